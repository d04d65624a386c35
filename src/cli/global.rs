// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! ```text
//! -c, --config FILE  ← a3update.toml (A3UPDATE_CONFIG)
//! --dry              ← log filesystem and process actions only
//! --log-level N      ← console verbosity (0-6)
//! --file-log-level N ← file verbosity (defaults to --log-level)
//! --log-file FILE    ← enables the file log
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::logging::{LogConfig, LogLevel};

/// Global options available for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Path to the configuration file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        env = "A3UPDATE_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Logs filesystem changes and external commands instead of running them.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            dry: false,
            log_level: None,
            file_log_level: None,
            log_file: None,
        }
    }
}

impl GlobalOptions {
    /// Logging setup for these options.
    ///
    /// The file level falls back to the console level.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(LogLevel::INFO);

        let file_level = self
            .file_log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(console_level);

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(file_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .build()
    }
}
