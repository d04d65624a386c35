// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Cursor;
use std::path::PathBuf;

use crate::cli::prompt::{
    HiddenKey, LinePrompter, Prompter, apply_hidden_key, ask_existing_file, ask_list, ask_parsed,
    parse_list,
};
use crate::cli::{Cli, Command};
use crate::config::types::PublishedFileId;
use crate::error::{A3Error, SetupError};
use crate::logging::LogLevel;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
    LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["a3update"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.global.config, PathBuf::from("a3update.toml"));
    assert!(!cli.global.dry);
    assert!(cli.update.should_validate());
    assert!(!cli.update.no_update);
    assert!(!cli.update.setup);
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["a3update", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_options_with_config() {
    let cli = Cli::try_parse_from(["a3update", "-c", "/etc/a3.toml", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
    assert_eq!(cli.global.config, PathBuf::from("/etc/a3.toml"));
}

#[test]
fn test_parse_update_flags() {
    let cli = Cli::try_parse_from([
        "a3update",
        "-u",
        "someone",
        "-p",
        "hunter2",
        "-n",
        "-s",
        "--no-validate",
        "--dry",
    ])
    .unwrap();
    assert_eq!(cli.update.username, "someone");
    assert_eq!(cli.update.password.as_deref(), Some("hunter2"));
    assert!(cli.update.no_update);
    assert!(cli.update.setup);
    assert!(!cli.update.should_validate());
    assert!(cli.global.dry);
}

#[test]
fn test_validate_flags_last_one_wins() {
    let cli = Cli::try_parse_from(["a3update", "--no-validate", "--validate"]).unwrap();
    assert!(cli.update.should_validate());

    let cli = Cli::try_parse_from(["a3update", "--validate", "--no-validate"]).unwrap();
    assert!(!cli.update.validate);
    assert!(!cli.update.should_validate());

    let cli = Cli::try_parse_from(["a3update", "--validate"]).unwrap();
    assert!(cli.update.validate);
    assert!(cli.update.should_validate());
}

#[test]
fn test_log_levels() {
    let cli = Cli::try_parse_from(["a3update", "-l", "5", "--log-file", "run.log"]).unwrap();
    let log = cli.global.log_config();
    assert_eq!(log.console_level(), LogLevel::TRACE);
    assert_eq!(log.file_level(), LogLevel::TRACE);
    assert_eq!(log.log_file(), Some("run.log"));

    let cli = Cli::try_parse_from(["a3update", "--file-log-level", "1"]).unwrap();
    let log = cli.global.log_config();
    assert_eq!(log.console_level(), LogLevel::INFO);
    assert_eq!(log.file_level(), LogLevel::ERROR);
    assert!(log.log_file().is_none());
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["a3update", "-l", "7"]).is_err());
}

#[test]
fn test_unknown_command_fails() {
    assert!(Cli::try_parse_from(["a3update", "build"]).is_err());
}

#[test]
fn test_prompt_input_default() {
    let mut p = prompter("\n/srv/custom\n");
    assert_eq!(p.input("Install dir", Some("server")).unwrap(), "server");
    assert_eq!(p.input("Install dir", Some("server")).unwrap(), "/srv/custom");

    let out = String::from_utf8(p.into_writer()).unwrap();
    assert_eq!(out, "Install dir [server]: Install dir [server]: ");
}

#[test]
fn test_prompt_input_required_asks_again() {
    let mut p = prompter("\n\n  key  \n");
    assert_eq!(p.input("API key", None).unwrap(), "key");
}

#[test]
fn test_prompt_confirm() {
    let mut p = prompter("maybe\nYES\n\n");
    assert!(p.confirm("Continue?", false).unwrap());
    assert!(!p.confirm("Continue?", false).unwrap());

    let out = String::from_utf8(p.into_writer()).unwrap();
    assert!(out.contains("please answer y or n"));
}

#[test]
fn test_prompt_eof_is_no_input() {
    let mut p = prompter("");
    let err = p.confirm("Create config?", true).unwrap_err();
    match err.downcast_ref::<A3Error>() {
        Some(A3Error::Setup(boxed)) => {
            assert!(matches!(boxed.as_ref(), SetupError::NoInput { question } if question == "Create config?"));
        }
        other => panic!("expected setup error, got {other:?}"),
    }
}

#[test]
fn test_prompt_password_from_reader() {
    let mut p = prompter("hunter2\n");
    assert_eq!(p.password("Steam password").unwrap(), "hunter2");

    let out = String::from_utf8(p.into_writer()).unwrap();
    assert_eq!(out, "Steam password: ");
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_hidden_keys_edit_answer() {
    let mut answer = String::new();
    for code in [
        KeyCode::Char('p'),
        KeyCode::Char('w'),
        KeyCode::Char('x'),
        KeyCode::Backspace,
        KeyCode::Left,
    ] {
        assert_eq!(apply_hidden_key(&mut answer, key(code)), HiddenKey::Continue);
    }
    assert_eq!(answer, "pw");

    let mut release = key(KeyCode::Char('z'));
    release.kind = KeyEventKind::Release;
    assert_eq!(apply_hidden_key(&mut answer, release), HiddenKey::Continue);
    assert_eq!(answer, "pw");

    assert_eq!(apply_hidden_key(&mut answer, key(KeyCode::Enter)), HiddenKey::Submit);
}

#[test]
fn test_hidden_keys_ctrl_c_aborts() {
    let mut answer = String::from("secret");
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(apply_hidden_key(&mut answer, ctrl_c), HiddenKey::Abort);
    // Plain 'c' is part of the answer.
    assert_eq!(apply_hidden_key(&mut answer, key(KeyCode::Char('c'))), HiddenKey::Continue);
    assert_eq!(answer, "secretc");
}

#[test]
fn test_prompt_list() {
    let mut p = prompter("12, abc\n1681170, 1042220 2647760\n");
    let ids: Vec<u32> = ask_list(&mut p, "CDLC app ids").unwrap();
    assert_eq!(ids, vec![1_681_170, 1_042_220, 2_647_760]);

    let mut p = prompter("\n");
    let ids: Vec<PublishedFileId> = ask_list(&mut p, "Collections").unwrap();
    assert!(ids.is_empty());
}

#[test]
fn test_parse_list() {
    assert_eq!(parse_list::<u32>(" 1,2 ,, 3 "), Some(vec![1, 2, 3]));
    assert_eq!(parse_list::<u32>("1,x"), None);
    assert_eq!(parse_list::<u32>(""), Some(vec![]));
}

#[test]
fn test_ask_parsed_repeats_until_valid() {
    let mut p = prompter("70000\n\n");
    let port: u16 = ask_parsed(&mut p, "Server port", "2302").unwrap();
    assert_eq!(port, 2302);

    let out = String::from_utf8(p.into_writer()).unwrap();
    assert!(out.contains("could not read '70000'"));
}

#[test]
fn test_ask_existing_file() {
    let temp = tempfile::tempdir().unwrap();
    let jar = temp.path().join("ArmA3Sync.jar");
    std::fs::write(&jar, b"").unwrap();

    let input = format!("{}\n{}\n", temp.path().join("missing.jar").display(), jar.display());
    let mut p = prompter(&input);
    assert_eq!(ask_existing_file(&mut p, "Path to ArmA3Sync.jar", None).unwrap(), jar);
}
