// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use a3update::cli::{Cli, Command};
use a3update::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

// =============================================================================
// Commands
// =============================================================================

#[test]
fn cli_no_command_runs_update() {
    let cli = Cli::try_parse_from(["a3update"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["a3update", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_options_command() {
    let cli = Cli::try_parse_from(["a3update", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
}

#[test]
fn cli_help_is_an_error_with_usage() {
    let err = Cli::try_parse_from(["a3update", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    let help = err.to_string();
    assert!(help.contains("--no-update"));
    assert!(help.contains("--username"));
    assert!(help.contains("ABSOLUTELY NO WARRANTY"));
}

// =============================================================================
// Update options
// =============================================================================

#[test]
fn cli_update_long_options() {
    let cli = Cli::try_parse_from([
        "a3update",
        "--username",
        "server_admin",
        "--password",
        "secret",
        "--no-update",
        "--setup",
        "--no-validate",
    ])
    .unwrap();

    assert_eq!(cli.update.username, "server_admin");
    assert_eq!(cli.update.password.as_deref(), Some("secret"));
    assert!(cli.update.no_update);
    assert!(cli.update.setup);
    assert!(!cli.update.should_validate());
}

#[test]
fn cli_update_options_before_command() {
    let cli = Cli::try_parse_from(["a3update", "-n", "version"]).unwrap();
    assert!(cli.update.no_update);
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Global options
// =============================================================================

#[test]
fn cli_global_options() {
    let cli = Cli::try_parse_from([
        "a3update",
        "--config",
        "/etc/a3update/main.toml",
        "--dry",
        "--log-level",
        "4",
        "--file-log-level",
        "6",
        "--log-file",
        "/var/log/a3update.log",
    ])
    .unwrap();

    assert_eq!(cli.global.config, PathBuf::from("/etc/a3update/main.toml"));
    assert!(cli.global.dry);

    let log = cli.global.log_config();
    assert_eq!(log.console_level(), LogLevel::DEBUG);
    assert_eq!(log.file_level(), LogLevel::DUMP);
    assert_eq!(log.log_file(), Some("/var/log/a3update.log"));
}

#[test]
fn cli_rejects_bad_log_level() {
    assert!(Cli::try_parse_from(["a3update", "--log-level", "9"]).is_err());
    assert!(Cli::try_parse_from(["a3update", "--log-level", "loud"]).is_err());
}

#[test]
fn cli_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["a3update", "--force"]).is_err());
}
