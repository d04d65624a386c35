// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Linking of mod signing keys into the server `keys/` directory.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;
use crate::utility::fs::link::{is_symlink, remove_entry, symlink_file};
use crate::utility::fs::walk::find_files_by_extension;

const KEY_EXTENSION: &str = "bikey";

/// Outcome of [`link_keys`] for one mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyLinkReport {
    /// Links created in the key directory.
    pub linked: Vec<PathBuf>,
    /// Keys skipped because their name was already present.
    pub duplicates: Vec<PathBuf>,
}

impl KeyLinkReport {
    /// True if the mod shipped no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linked.is_empty() && self.duplicates.is_empty()
    }
}

/// Removes every symlink directly inside `keys_dir`.
///
/// Regular files (the vanilla `a3.bikey`, keys copied by hand) are left
/// alone. The directory is created when missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read, or a link
/// cannot be removed.
pub async fn clear_key_links(keys_dir: &Path) -> Result<usize> {
    fs::create_dir_all(keys_dir)
        .await
        .with_context(|| format!("failed to create directory {}", keys_dir.display()))?;

    let mut reader = fs::read_dir(keys_dir)
        .await
        .with_context(|| format!("failed to read directory {}", keys_dir.display()))?;

    let mut removed = 0;
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", keys_dir.display()))?
    {
        let path = entry.path();
        if is_symlink(&path).await {
            remove_entry(&path).await?;
            removed += 1;
        }
    }

    debug!(dir = %keys_dir.display(), removed, "cleared key links");
    Ok(removed)
}

/// Links every `*.bikey` below `mod_dir` into `keys_dir` under its lowercase
/// file name. An existing entry with the same name is kept.
///
/// # Errors
///
/// Returns an error if `mod_dir` does not exist or a link cannot be created.
pub async fn link_keys(mod_dir: &Path, keys_dir: &Path) -> Result<KeyLinkReport> {
    let root = std::path::absolute(mod_dir)
        .with_context(|| format!("failed to resolve {}", mod_dir.display()))?;

    let walk_root = root.clone();
    let keys = tokio::task::spawn_blocking(move || {
        find_files_by_extension(&walk_root, KEY_EXTENSION)
    })
    .await
    .context("key search task panicked")??;

    fs::create_dir_all(keys_dir)
        .await
        .with_context(|| format!("failed to create directory {}", keys_dir.display()))?;

    let mut report = KeyLinkReport::default();
    for key in keys {
        let Some(file_name) = key.file_name() else {
            continue;
        };
        let link = keys_dir.join(file_name.to_string_lossy().to_lowercase());

        if fs::symlink_metadata(&link).await.is_ok() {
            warn!(
                key = %key.display(),
                existing = %link.display(),
                "duplicate key, keeping existing entry"
            );
            report.duplicates.push(key);
            continue;
        }

        symlink_file(&key, &link).await?;
        debug!(key = %key.display(), link = %link.display(), "linked key");
        report.linked.push(link);
    }

    Ok(report)
}
