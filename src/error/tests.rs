// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{A3Error, A3Result, ConfigError, FsError, ProcessError, SetupError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "steam".to_string(),
        key: "api_key".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'api_key' in section '[steam]'");
}

#[test]
fn test_setup_error_display() {
    let err = SetupError::MissingTool {
        tool: "java".to_string(),
        hint: "ArmA3Sync needs a Java runtime".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"java is required but was not found: ArmA3Sync needs a Java runtime"
    );
}

#[test]
fn test_boxed_conversion() {
    let err: A3Error = ProcessError::RetriesExhausted {
        command: "steamcmd".to_string(),
        attempts: 5,
    }
    .into();
    assert!(matches!(err, A3Error::Process(_)));
    insta::assert_snapshot!(err.to_string(), @"process error: 'steamcmd' failed after 5 attempts");
}

#[test]
fn test_walk_failed_display() {
    let err: A3Error = FsError::WalkFailed {
        path: "/srv/mods/450814997".to_string(),
        errors: 2,
    }
    .into();
    assert!(matches!(err, A3Error::Fs(_)));
    insta::assert_snapshot!(
        err.to_string(),
        @"filesystem error: 2 unreadable entries below '/srv/mods/450814997'"
    );
}

#[test]
fn test_a3_error_size() {
    // Every variant is a thin Box, discriminant + pointer
    let size = std::mem::size_of::<A3Error>();
    assert!(size <= 16, "A3Error is {size} bytes, expected <= 16");
}

#[test]
fn test_a3_result_size() {
    let size = std::mem::size_of::<A3Result<()>>();
    assert!(size <= 24, "A3Result<()> is {size} bytes, expected <= 24");
}
