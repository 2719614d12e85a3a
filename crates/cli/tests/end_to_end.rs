// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg(unix)]

//! End-to-end runs of the binary against shell-script stand-ins.
//!
//! The fake compiler copies the source program to `out.asm`, or prints the
//! program when it contains `ERROR`. The fake simulator prints two banner
//! lines, the artifact, then a one-line footer.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

const COMPILER: &str = r#"#!/bin/sh
if grep -q ERROR "$1"; then
    cat "$1"
    exit 0
fi
cp "$1" out.asm
"#;

const SIMULATOR: &str = r#"echo "MARS 4.5  Copyright 2003-2014 Pete Sanderson and Kenneth Vollmar"
echo ""
cat "$1"
echo "-- program is finished running --"
"#;

const CONFIG: &str = r#"
[simulator]
launcher = "sh"
launcher_args = []
"#;

/// Workspace holding the fake toolchain and a fixture tree
struct Harness {
    dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let compiler = dir.path().join("cpsl");
        fs::write(&compiler, COMPILER).unwrap();
        fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("mars.sh"), SIMULATOR).unwrap();
        fs::write(dir.path().join("verify.toml"), CONFIG).unwrap();
        fs::create_dir_all(dir.path().join("CpslFiles")).unwrap();
        fs::create_dir_all(dir.path().join("TestFilesCorrectOutput")).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a program whose simulated output is `output`
    fn program(&self, name: &str, output: &str) -> &Self {
        let path = self.path().join("CpslFiles").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, output).unwrap();
        self
    }

    fn expect(&self, stem: &str, content: &str) -> &Self {
        let path = self
            .path()
            .join("TestFilesCorrectOutput")
            .join(format!("{}_ExpectedOutput.txt", stem));
        fs::write(path, content).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cpsl-verify").unwrap();
        cmd.current_dir(self.path())
            .env_remove("CPSL_VERIFY_COMPILER")
            .env_remove("CPSL_VERIFY_COMPILE_TIMEOUT_MS")
            .env_remove("CPSL_VERIFY_EXECUTE_TIMEOUT_MS")
            .env("CPSL_VERIFY_CONFIG", "verify.toml")
            .args(["mars.sh", "--cpslpath", "./cpsl"]);
        cmd
    }
}

#[test]
fn test_all_fixtures_pass() {
    let harness = Harness::new();
    harness.program("count.cpsl", "1\n2\n").expect("count", "1\n2\n");
    harness
        .program("nested/hello.cpsl", "hello\n")
        .expect("hello", "hello\n");

    harness
        .cmd()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Files that passed"))
        .stdout(predicate::str::contains("\tcount.cpsl"))
        .stdout(predicate::str::contains("\thello.cpsl"))
        .stdout(predicate::str::contains("2 passed, 0 failed, 2 total"))
        .stdout(predicate::str::contains("Files that did not pass").not());
}

#[test]
fn test_failures_are_reported_and_run_continues() {
    let harness = Harness::new();
    harness.program("a_extra.cpsl", "1\n2\n3\n").expect("a_extra", "1\n2\n");
    harness.program("b_absent.cpsl", "1\n");
    harness.program("c_broken.cpsl", "ERROR: expected ;\n").expect("c_broken", "x\n");
    harness.program("d_ok.cpsl", "ok\n").expect("d_ok", "ok\n");

    harness
        .cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "The length of the program's output is 3 but expected a length of 2",
        ))
        .stdout(predicate::str::contains("Addition:  3: 3"))
        .stdout(predicate::str::contains(
            "Failed to compile CpslFiles/c_broken.cpsl with error ERROR: expected ;",
        ))
        .stdout(predicate::str::contains("Files that did not pass"))
        .stdout(predicate::str::contains("1 passed, 3 failed, 4 total"));
}

#[test]
fn test_missing_compiler_is_fatal() {
    let harness = Harness::new();
    harness.program("count.cpsl", "1\n").expect("count", "1\n");

    let mut cmd = Command::cargo_bin("cpsl-verify").unwrap();
    cmd.current_dir(harness.path())
        .env_remove("CPSL_VERIFY_COMPILER")
        .env_remove("CPSL_VERIFY_CONFIG")
        .arg("mars.sh")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Did you forget to build the compiler?"))
        .stdout(predicate::str::contains("Attempting to compile").not());
}

#[test]
fn test_verbose_and_pmars_output() {
    let harness = Harness::new();
    harness.program("v.cpsl", "7\n").expect("v", "7\n");

    harness
        .cmd()
        .args(["-v", "-p"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("MARS 4.5"))
        .stdout(predicate::str::contains("The line 1: 7 is as expected"));
}

#[test]
fn test_all_mismatches_and_diff() {
    let harness = Harness::new();
    harness.program("m.cpsl", "1\nX\nY\n").expect("m", "1\n2\n3\n");

    harness
        .cmd()
        .args(["--all-mismatches", "--diff"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid output at line 2"))
        .stdout(predicate::str::contains("Invalid output at line 3"))
        .stdout(predicate::str::contains("+++ actual"));
}

#[test]
fn test_record_writes_one_json_line_per_fixture() {
    let harness = Harness::new();
    harness.program("a.cpsl", "1\n").expect("a", "1\n");
    harness.program("b.cpsl", "2\n").expect("b", "3\n");

    harness.cmd().args(["--record", "outcomes.jsonl"]).assert().code(1);

    let content = fs::read_to_string(harness.path().join("outcomes.jsonl")).unwrap();
    let records: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["fixture"], "a.cpsl");
    assert_eq!(records[0]["passed"], true);
    assert_eq!(records[1]["fixture"], "b.cpsl");
    assert_eq!(records[1]["passed"], false);
    assert_eq!(records[1]["stage"], "compare");
}

#[test]
fn test_zero_timeout_is_rejected() {
    let harness = Harness::new();

    harness
        .cmd()
        .args(["--execute-timeout-ms", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn test_no_fixtures_warns() {
    let harness = Harness::new();

    harness
        .cmd()
        .assert()
        .code(0)
        .stderr(predicate::str::contains("No .cpsl files found"))
        .stdout(predicate::str::contains("0 passed, 0 failed, 0 total"));
}

#[test]
fn test_missing_marspath_is_usage_error() {
    let mut cmd = Command::cargo_bin("cpsl-verify").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MARSPATH"));
}
