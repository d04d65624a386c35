// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for external process management.
//!
//! ```text
//!      core
//!       |
//!       v
//!    process
//!       |
//!   Builder  Output
//!   which cache, redacted args
//! ```

pub mod process;
