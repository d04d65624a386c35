// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{A3Error, FsError, Result};
use flume::unbounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    /// Files found during traversal, sorted.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Entries that could not be read; each one was logged as a warning.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Visits everything, hidden entries included, without following links.
fn build_walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder.follow_links(false);
    builder.hidden(false);

    // Workshop payloads occasionally ship a stray .gitignore; never honour it.
    builder.ignore(false);
    builder.parents(false);
    builder.git_ignore(false);
    builder.git_global(false);
    builder.git_exclude(false);

    builder
}

/// Performs parallel directory traversal using `ignore::WalkParallel`.
///
/// Results are collected through a flume channel and sorted, so callers see
/// a deterministic order regardless of thread scheduling.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use a3update::utility::fs::walk::parallel_walk;
///
/// let result = parallel_walk("/srv/mods/steamapps/workshop/content/107410")?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let (file_tx, file_rx) = unbounded::<PathBuf>();
    let error_count = Arc::new(AtomicUsize::new(0));

    build_walker(root).build_parallel().run(|| {
        let file_tx = file_tx.clone();
        let error_count = Arc::clone(&error_count);

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        let _ = file_tx.send(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                    error_count.fetch_add(1, Ordering::Relaxed);
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(file_tx);

    let mut files: Vec<PathBuf> = file_rx.iter().collect();
    files.sort();

    Ok(WalkResult {
        files,
        error_count: error_count.load(Ordering::Relaxed),
    })
}

/// Finds every file below `root` whose extension equals `extension`,
/// compared ASCII case-insensitively. The result is sorted.
///
/// # Errors
///
/// Returns an error if the root directory does not exist, or
/// [`FsError::WalkFailed`] if any entry below it could not be read.
pub fn find_files_by_extension<P: AsRef<Path>>(root: P, extension: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let walk = parallel_walk(root)?;
    if walk.error_count() > 0 {
        return Err(A3Error::from(FsError::WalkFailed {
            path: root.display().to_string(),
            errors: walk.error_count(),
        })
        .into());
    }

    Ok(walk
        .files
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect())
}
