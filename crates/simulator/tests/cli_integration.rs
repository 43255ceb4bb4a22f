//! Integration tests for the w16-sim CLI.

use anyhow as _;
use clap as _;
use serde_json as _;
use tracing as _;
use tracing_subscriber as _;
use w16_core as _;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use w16_asm::{assemble_source, write_image, AssemblerConfig};
use w16_core::Profile;

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("w16-sim")
}

fn assemble(dir: &Path, name: &str, source: &str, profile: Profile) -> PathBuf {
    let assembly = assemble_source(source, &AssemblerConfig::for_profile(profile)).unwrap();
    let path = dir.join(name);
    write_image(&assembly, &path).unwrap();
    path
}

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run w16-sim");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn runs_basic_program_to_halt() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(
        dir.path(),
        "a.bin",
        "SET A,#5\nSET B,#3\nADD A,B\nOUT A\nHLT\n",
        Profile::Basic,
    );

    let output = run(&[image.to_str().unwrap(), "--profile", "basic"], "");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OUTPUT from register A: 8"));
    assert!(stdout.contains("--- HLT instruction at PC 4 ---"));
}

#[test]
fn reads_input_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(
        dir.path(),
        "in.bin",
        "INP EAX\nINC EAX\nOUT EAX\n",
        Profile::Extended,
    );

    let output = run(&[image.to_str().unwrap()], "41\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INPUT required for register EAX: "));
    assert!(stdout.contains("OUTPUT from register EAX: 42"));
    assert!(stdout.contains("--- end of program at PC 3 ---"));
}

#[test]
fn fault_exits_with_status_two() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "div.bin", "DIV EAX,EBX\n", Profile::Extended);

    let output = run(&[image.to_str().unwrap()], "");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--- FAULT: division by zero at PC 0"));
}

#[test]
fn step_limit_stops_runaway_loop() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "loop.bin", "spin: JMP spin\n", Profile::Basic);

    let output = run(
        &[image.to_str().unwrap(), "--profile", "basic", "--max-steps", "50"],
        "",
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("step limit of 50 reached"));
}

#[test]
fn dump_prints_final_state() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "d.bin", "SET C,#7\nSTA C,9\nHLT\n", Profile::Basic);

    let output = run(&[image.to_str().unwrap(), "-p", "basic", "--dump"], "");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- MACHINE STATE (basic) ---"));
    assert!(stdout.contains("Registers: A=0  B=0  C=7"));
    assert!(stdout.contains("  [08]:     0     7"));
}

#[test]
fn json_exports_state() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "j.bin", "MOV EAX,#3\nHLT\n", Profile::Extended);

    let output = run(&[image.to_str().unwrap(), "--json"], "");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find('{').unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(value["profile"], "extended");
    assert_eq!(value["pc"], 1);
    assert_eq!(value["run_state"], "Halted");
}

#[test]
fn disassemble_lists_the_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "x.bin", "MOV EAX,[EBX+2]\nRET\n", Profile::Extended);

    let output = run(&[image.to_str().unwrap(), "--disassemble"], "");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("000: 7822  MOV EAX, [EBX+2]"));
    assert!(stdout.contains("001: 7000  RET"));
}

#[test]
fn missing_image_exits_with_status_one() {
    let output = run(&["/nonexistent/prog.bin"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn image_file_is_little_endian() {
    let dir = tempfile::tempdir().unwrap();
    let image = assemble(dir.path(), "le.bin", "MOV EAX,#1\n", Profile::Extended);
    assert_eq!(fs::read(image).unwrap(), vec![0x01, 0x30]);
}
