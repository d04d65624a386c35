// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Creates a symlink at `link` pointing to the file `target`.
///
/// # Errors
///
/// Returns an error if the link cannot be created, e.g. because `link`
/// already exists or (on Windows) the process lacks the symlink privilege.
pub async fn symlink_file(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = fs::symlink(target, link).await;
    #[cfg(windows)]
    let result = fs::symlink_file(target, link).await;

    result.with_context(|| {
        format!(
            "failed to link {} -> {}",
            link.display(),
            target.display()
        )
    })
}

/// Returns true if `path` itself is a symlink (dangling links included).
pub async fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .await
        .is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Removes whatever sits at `path` without following links.
///
/// Symlinks and files are unlinked, real directories are removed
/// recursively. A missing path is not an error.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be removed.
pub async fn remove_entry(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to stat {}", path.display()));
        }
    };

    let file_type = meta.file_type();
    let result = if file_type.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        match fs::remove_file(path).await {
            // Directory symlinks on Windows need remove_dir.
            Err(e) if cfg!(windows) && file_type.is_symlink() => {
                fs::remove_dir(path).await.map_err(|_| e)
            }
            other => other,
        }
    };

    result.with_context(|| format!("failed to remove {}", path.display()))
}
