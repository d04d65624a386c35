// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   (default) update, setup, options, version
//! ```

pub mod config;
pub mod setup;
pub mod update;
