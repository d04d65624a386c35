// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::link::{is_symlink, remove_entry, symlink_file};
use super::walk::{find_files_by_extension, parallel_walk};
use crate::error::{A3Error, FsError};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_parallel_walk() {
    let temp = temp_dir();

    std::fs::create_dir(temp.path().join("addons")).unwrap();
    std::fs::write(temp.path().join("mod.cpp"), "").unwrap();
    std::fs::write(temp.path().join("addons/main.pbo"), "").unwrap();
    std::fs::write(temp.path().join(".hidden"), "").unwrap();

    let result = parallel_walk(temp.path()).unwrap();

    assert_eq!(result.files().len(), 3);
    assert!(result.files().windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_parallel_walk_ignores_gitignore() {
    let temp = temp_dir();

    std::fs::write(temp.path().join(".gitignore"), "*.pbo\n").unwrap();
    std::fs::write(temp.path().join("main.pbo"), "").unwrap();

    let result = parallel_walk(temp.path()).unwrap();
    assert!(
        result
            .files()
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == "main.pbo"))
    );
}

#[test]
fn test_parallel_walk_missing_root() {
    let temp = temp_dir();
    assert!(parallel_walk(temp.path().join("absent")).is_err());
}

#[test]
fn test_find_files_by_extension_is_case_insensitive() {
    let temp = temp_dir();

    std::fs::create_dir_all(temp.path().join("Keys")).unwrap();
    std::fs::write(temp.path().join("Keys/ACE_3.BIKEY"), "").unwrap();
    std::fs::write(temp.path().join("Keys/cba.bikey"), "").unwrap();
    std::fs::write(temp.path().join("Keys/readme.txt"), "").unwrap();

    let keys = find_files_by_extension(temp.path(), "bikey").unwrap();
    let names: Vec<String> = keys
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();

    assert_eq!(names, vec!["ACE_3.BIKEY", "cba.bikey"]);
}

#[cfg(unix)]
#[test]
fn test_find_files_by_extension_fails_on_unreadable_dir() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let locked = temp.path().join("keys");
    std::fs::create_dir_all(&locked).unwrap();
    std::fs::write(locked.join("cba_3.bikey"), "").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Permissions do not apply to root.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = find_files_by_extension(temp.path(), "bikey");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    match err.downcast_ref::<A3Error>() {
        Some(A3Error::Fs(boxed)) => {
            assert!(matches!(boxed.as_ref(), FsError::WalkFailed { errors: 1, .. }));
        }
        other => panic!("expected filesystem error, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_and_remove_entry() {
    let temp = temp_dir();
    let target = temp.path().join("target.pbo");
    let link = temp.path().join("link.pbo");
    std::fs::write(&target, "payload").unwrap();

    symlink_file(&target, &link).await.unwrap();
    assert!(is_symlink(&link).await);
    assert!(!is_symlink(&target).await);
    assert_eq!(std::fs::read_to_string(&link).unwrap(), "payload");

    remove_entry(&link).await.unwrap();
    assert!(!link.exists());
    assert!(target.exists(), "removing a link must keep its target");
}

#[tokio::test]
async fn test_remove_entry_directory_and_missing() {
    let temp = temp_dir();
    let dir = temp.path().join("@old_mod");
    std::fs::create_dir_all(dir.join("addons")).unwrap();
    std::fs::write(dir.join("addons/a.pbo"), "").unwrap();

    remove_entry(&dir).await.unwrap();
    assert!(!dir.exists());

    // Second removal is a no-op
    remove_entry(&dir).await.unwrap();
}
