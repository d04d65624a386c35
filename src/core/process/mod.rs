// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("steamcmd.sh")
//!   .arg() .secret_arg() .inherit_stdio()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr (or inherit)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
