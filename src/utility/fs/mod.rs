// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and link handling.
//!
//! ```text
//! walk:  parallel_walk()             ignore::WalkParallel (multi-core)
//!        find_files_by_extension()   case-insensitive extension match
//! link:  symlink_file()              platform file symlink
//!        remove_entry()              unlink links, rm -r directories
//!        is_symlink()                lstat check
//! ```

pub mod link;
pub mod walk;

#[cfg(test)]
mod tests;
