// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory mirror: rebuilds a source tree under normalized names, linking
//! files instead of copying them.
//!
//! ```text
//! mirror_tree(src, dst)
//!   remove dst (links only, never their targets)
//!   mkdir dst
//!   for entry in sorted(src):
//!     dir  --> mkdir dst/<normalized>, recurse   (collision: merge)
//!     file --> symlink dst/<normalized> -> src   (collision: keep first)
//! ```

use anyhow::Context;
use std::path::Path;
use tokio::fs;
use tracing::{debug, trace, warn};

use super::{MOD_PREFIX, normalize_entry_name};
use crate::error::{FsError, Result};
use crate::utility::fs::link::{remove_entry, symlink_file};

/// Counts of what [`mirror_tree`] created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorStats {
    /// Symlinks created.
    pub files: usize,
    /// Directories created (the destination root excluded).
    pub directories: usize,
    /// Source entries dropped or merged because their normalized name was taken.
    pub collisions: usize,
}

/// Replaces `dst` with a mirror of `src`.
///
/// Every directory in `src` is recreated under its normalized name and every
/// file is symlinked to its absolute source path. Entries are visited in
/// name order, so when two names normalize to the same string the
/// lexicographically first one wins.
///
/// # Errors
///
/// Returns an error if `src` is not a directory or any filesystem operation
/// fails.
pub async fn mirror_tree(src: &Path, dst: &Path) -> Result<MirrorStats> {
    let src = std::path::absolute(src)
        .with_context(|| format!("failed to resolve {}", src.display()))?;

    let is_dir = fs::metadata(&src).await.is_ok_and(|m| m.is_dir());
    if !is_dir {
        return Err(crate::error::A3Error::from(FsError::NotFound(
            src.display().to_string(),
        ))
        .into());
    }

    remove_entry(dst).await?;
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut stats = MirrorStats::default();
    mirror_dir(&src, dst, &mut stats).await?;

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = stats.files,
        directories = stats.directories,
        "mirrored"
    );
    Ok(stats)
}

async fn mirror_dir(src: &Path, dst: &Path, stats: &mut MirrorStats) -> Result<()> {
    let mut reader = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        entries.push(entry);
    }
    entries.sort_by_key(tokio::fs::DirEntry::file_name);

    for entry in entries {
        let src_path = entry.path();
        let name = normalize_entry_name(&entry.file_name().to_string_lossy())?;
        let dst_path = dst.join(&name);

        // Follows links, so a linked directory in the source is recursed into.
        let src_is_dir = fs::metadata(&src_path).await.is_ok_and(|m| m.is_dir());
        let existing = fs::symlink_metadata(&dst_path).await.ok();

        if src_is_dir {
            match existing {
                Some(meta) if meta.is_dir() => {
                    warn!(
                        src = %src_path.display(),
                        dst = %dst_path.display(),
                        "name collision, merging directories"
                    );
                    stats.collisions += 1;
                }
                Some(_) => {
                    warn!(
                        src = %src_path.display(),
                        dst = %dst_path.display(),
                        "name collision, keeping existing entry"
                    );
                    stats.collisions += 1;
                    continue;
                }
                None => {
                    fs::create_dir(&dst_path).await.with_context(|| {
                        format!("failed to create directory {}", dst_path.display())
                    })?;
                    stats.directories += 1;
                }
            }
            Box::pin(mirror_dir(&src_path, &dst_path, stats)).await?;
        } else if existing.is_some() {
            warn!(
                src = %src_path.display(),
                dst = %dst_path.display(),
                "name collision, keeping existing entry"
            );
            stats.collisions += 1;
        } else {
            symlink_file(&src_path, &dst_path).await?;
            trace!(link = %dst_path.display(), target = %src_path.display(), "linked");
            stats.files += 1;
        }
    }

    Ok(())
}

/// Deletes every `@`-prefixed entry directly inside `dir`, creating `dir` if
/// it does not exist. Returns the number of entries removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or an entry cannot be
/// removed.
pub async fn remove_published_mods(dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut reader = fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut removed = 0;
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", dir.display()))?
    {
        if entry.file_name().to_string_lossy().starts_with(MOD_PREFIX) {
            remove_entry(&entry.path()).await?;
            removed += 1;
        }
    }

    debug!(dir = %dir.display(), removed, "removed published mods");
    Ok(removed)
}

/// Removes every entry inside `dir`, keeping `dir` itself.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or an entry cannot be
/// removed.
pub async fn clear_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut reader = fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read directory {}", dir.display()))?;
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", dir.display()))?
    {
        remove_entry(&entry.path()).await?;
    }
    Ok(())
}
