//! Runs the real `dmenv-installer` binary on failure paths that stop before any network access.

use std::fs;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn installer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dmenv-installer"));
    cmd.env("NO_COLOR", "1").stdin(Stdio::null());
    cmd
}

#[test]
fn refuses_existing_destination_without_upgrade() {
    let tmp_dir = TempDir::new().expect("temp dir");
    let dest = tmp_dir.path().join("dmenv");
    fs::write(&dest, b"old binary").expect("write existing file");

    let output = installer().arg("--dest").arg(&dest).output().expect("run installer");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists. Use --upgrade to upgrade"), "{stderr}");
    assert_eq!(fs::read(&dest).expect("read existing file"), b"old binary");
}

#[test]
fn fails_fast_without_writable_path_entry() {
    let output = installer()
        .env("PATH", "/definitely/not/a/dir")
        .output()
        .expect("run installer");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No writable location found in PATH"), "{stderr}");
}

#[test]
fn help_lists_flags() {
    let output = installer().arg("--help").output().expect("run installer");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dest"));
    assert!(stdout.contains("--upgrade"));
}
