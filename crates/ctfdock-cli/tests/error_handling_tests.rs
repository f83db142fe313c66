//! Exit codes and error output of the `ctfdock` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ctfdock(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ctfdock").unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("CTFDOCK_TOOLKIT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_prints_usage() {
    let tmp = TempDir::new().unwrap();
    ctfdock(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unsupported_platform_version() {
    let tmp = TempDir::new().unwrap();
    ctfdock(tmp.path())
        .args(["22", "-t", "task", "-d", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value '22'"));
}

#[test]
fn test_missing_required_task_dir() {
    let tmp = TempDir::new().unwrap();
    ctfdock(tmp.path())
        .args(["20", "-d", "out"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--task-dir"));
}

#[test]
fn test_task_dir_does_not_exist() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    ctfdock(tmp.path())
        .args(["20", "-t"])
        .arg(&missing)
        .arg("-d")
        .arg(tmp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Task directory"));
}

#[test]
fn test_missing_flag_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let task = tmp.path().join("task");
    fs::create_dir(&task).unwrap();
    fs::write(task.join("chal"), b"ELF").unwrap();

    ctfdock(tmp.path())
        .args(["20", "-t"])
        .arg(&task)
        .arg("-d")
        .arg(tmp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no file's name contains 'flag'"));
}

#[test]
fn test_two_task_files_is_user_error() {
    let tmp = TempDir::new().unwrap();
    let task = tmp.path().join("task");
    fs::create_dir(&task).unwrap();
    fs::write(task.join("chal"), b"ELF").unwrap();
    fs::write(task.join("notes"), b"hi").unwrap();

    ctfdock(tmp.path())
        .args(["20", "-t"])
        .arg(&task)
        .arg("-d")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Too many"));
}

#[test]
fn test_output_dir_over_task_dir_is_refused() {
    let tmp = TempDir::new().unwrap();
    let task = tmp.path().join("chal");
    fs::create_dir(&task).unwrap();
    fs::write(task.join("chal"), b"ELF").unwrap();
    fs::write(task.join("flag"), b"flag{}").unwrap();

    ctfdock(tmp.path())
        .args(["20", "-t"])
        .arg(&task)
        .arg("-d")
        .arg(task.join(".."))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("would overwrite the task directory"));

    assert_eq!(fs::read(task.join("chal")).unwrap(), b"ELF");
    assert_eq!(fs::read(task.join("flag")).unwrap(), b"flag{}");
}

#[test]
fn test_patchelf_without_libc_version() {
    let tmp = TempDir::new().unwrap();
    let task = tmp.path().join("task");
    fs::create_dir(&task).unwrap();
    fs::write(task.join("chal"), b"ELF").unwrap();
    fs::write(task.join("flag"), b"flag{}").unwrap();

    ctfdock(tmp.path())
        .args(["20", "-p", "-t"])
        .arg(&task)
        .arg("-d")
        .arg(tmp.path())
        .arg("--toolkit-dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("specify the version of glibc"));

    assert!(!tmp.path().join("chal").exists());
}

#[test]
fn test_unknown_libc_version_lists_available() {
    let tmp = TempDir::new().unwrap();
    let task = tmp.path().join("task");
    fs::create_dir(&task).unwrap();
    fs::write(task.join("chal"), b"ELF").unwrap();
    fs::write(task.join("flag"), b"flag{}").unwrap();
    let kit = tmp.path().join("kit");
    fs::create_dir_all(kit.join("libs")).unwrap();
    fs::write(kit.join("patchelf"), b"tool").unwrap();
    fs::write(kit.join("libs/libc-2.27.so"), b"").unwrap();
    fs::write(kit.join("libs/ld-2.27.so"), b"").unwrap();

    ctfdock(tmp.path())
        .args(["18", "-p", "-l", "2.99", "-t"])
        .arg(&task)
        .arg("-d")
        .arg(tmp.path())
        .arg("--toolkit-dir")
        .arg(&kit)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("libc-2.99.so"))
        .stderr(predicate::str::contains("2.27"));
}

#[test]
fn test_explicit_config_file_missing() {
    let tmp = TempDir::new().unwrap();
    ctfdock(tmp.path())
        .args(["20", "-t", "task", "-d", "out", "-c"])
        .arg(tmp.path().join("absent.toml"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}
