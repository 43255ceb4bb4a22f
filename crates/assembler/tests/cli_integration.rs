//! Integration tests for the w16-asm CLI.

use anyhow as _;
use clap as _;
use proptest as _;
use rstest as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;
use w16_asm as _;
use w16_core as _;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("w16-asm")
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to run w16-asm")
}

#[test]
fn assembles_basic_program() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "add.asm", "SET A, #5\nHLT\n");
    let output = temp_dir.path().join("add.bin");

    let result = run(&[
        source.to_str().unwrap(),
        output.to_str().unwrap(),
        "--profile",
        "basic",
    ]);

    assert!(result.status.success());
    assert_eq!(fs::read(&output).unwrap(), vec![0x05, 0x08, 0x00, 0x00]);

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("[Pass 1]"));
    assert!(stdout.contains("[Pass 2]"));
    assert!(stdout.contains("  L000: SET A, #5                 -> 0x0805"));
    assert!(stdout.contains("Assembled 2 instructions (4 bytes)"));
}

#[test]
fn extended_is_the_default_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "mov.asm", "MOV EAX, #1\n");
    let output = temp_dir.path().join("mov.bin");

    let result = run(&[source.to_str().unwrap(), output.to_str().unwrap()]);

    assert!(result.status.success());
    assert_eq!(fs::read(&output).unwrap(), vec![0x01, 0x30]);
}

#[test]
fn quiet_suppresses_progress_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "q.asm", "HLT\n");
    let output = temp_dir.path().join("q.bin");

    let result = run(&[source.to_str().unwrap(), output.to_str().unwrap(), "--quiet"]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(!stdout.contains("L000"));
    assert!(stdout.contains("Assembled 1 instructions"));
}

#[test]
fn listing_file_is_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "l.asm", "loop: JMP loop\n");
    let output = temp_dir.path().join("l.bin");
    let listing = temp_dir.path().join("l.lst");

    let result = run(&[
        source.to_str().unwrap(),
        output.to_str().unwrap(),
        "--listing",
        listing.to_str().unwrap(),
        "-q",
    ]);

    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&listing).unwrap(),
        "  L000: JMP loop                  -> 0xC000\n"
    );
}

#[test]
fn encode_error_exits_nonzero_without_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "bad.asm", "HLT\nMOV EAX, #256\n");
    let output = temp_dir.path().join("bad.bin");

    let result = run(&[source.to_str().unwrap(), output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error: line 2: immediate 256 out of range (0..=255)"));
    assert!(stderr.contains("MOV EAX, #256"));
}

#[test]
fn missing_source_exits_nonzero() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("none.bin");

    let result = run(&["/nonexistent/source.asm", output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("error: cannot read"));
}

#[test]
fn unknown_profile_is_rejected() {
    let result = run(&["a.asm", "a.bin", "--profile", "turbo"]);
    assert!(!result.status.success());
}

#[test]
fn duplicate_labels_warn_but_succeed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "dup.asm", "x: HLT\nx: HLT\n");
    let output = temp_dir.path().join("dup.bin");

    let result = run(&[source.to_str().unwrap(), output.to_str().unwrap()]);

    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("warning: line 2: duplicate label 'x'"));
}
