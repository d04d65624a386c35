// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  parallel_walk(), find_files_by_extension()
//!   link:  symlink_file(), remove_entry(), is_symlink()
//! ```

pub mod fs;
