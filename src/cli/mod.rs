// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for a3update using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! a3update [global options] [update options]   update server, mods, publishers
//! a3update version
//! a3update options
//! ```

pub mod global;
pub mod prompt;
pub mod update;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::update::UpdateArgs;
use clap::{Parser, Subcommand};

/// Arma 3 Server Updater
///
/// Keeps an Arma 3 dedicated server and its workshop mods up to date.
#[derive(Debug, Parser)]
#[command(
    name = "a3update",
    author,
    version,
    about = "Arma 3 dedicated server and workshop mod updater",
    long_about = "a3update-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Updates the server and its creator DLC through SteamCMD, downloads\n\
                  every mod of the configured workshop collections, links them into\n\
                  the server as lowercase @folders and refreshes ArmA3Sync, Swifty\n\
                  and launcher preset outputs.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from a3update.toml in the working directory\n\
                  (see --config). A missing file starts the setup wizard after\n\
                  confirmation. Any key can be overridden with an environment\n\
                  variable such as A3UPDATE_STEAM__API_KEY."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Options of the update run
    #[command(flatten)]
    pub update: UpdateArgs,

    /// Command to execute, the update run when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values, secrets hidden.
    Options,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
