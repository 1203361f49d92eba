// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behaviour when no server is reachable.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use yare::parameterized;

const REFUSED: &str = "http://127.0.0.1:1";

fn bfpu(config_home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("bfpu");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("BFPU_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

#[parameterized(
    status = { &["status"], "state" },
    output = { &["output"], "output" },
    program_show = { &["program", "show"], "code" },
    input_show = { &["input", "show"], "input" },
    speed_show = { &["speed", "show"], "speed" },
    play = { &["play"], "state" },
    step = { &["step", "3"], "state" },
)]
fn reads_fail_when_unreachable(args: &[&str], resource: &str) {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(args)
        .args(["--origin", REFUSED])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "error: {} is unavailable",
            resource
        )))
        .stderr(predicate::str::contains("hint: is the server running"));
}

#[parameterized(
    input_set = { &["input", "set", "AB"] },
    input_clear = { &["input", "clear"] },
    control_on = { &["control", "on"] },
    control_off = { &["control", "off"] },
    preset = { &["program", "preset", "0"] },
)]
fn writes_fail_when_unreachable(args: &[&str]) {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(args)
        .args(["--origin", REFUSED])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: request failed"));
}

#[test]
fn missing_program_file_fails_before_connecting() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["program", "write"])
        .arg(home.path().join("absent.bf"))
        .args(["--origin", REFUSED])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: io error"));
}

#[test]
fn verbose_logs_to_stderr() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["-v", "status", "--origin", REFUSED])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("connecting to http://127.0.0.1:1"));
}
