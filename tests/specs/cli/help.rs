// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use yare::parameterized;

fn bfpu() -> Command {
    cargo_bin_cmd!("bfpu")
}

#[test]
fn help_lists_commands() {
    bfpu()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("examples"))
        .stdout(predicate::str::contains("Get started"));
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    bfpu()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_prints_version() {
    bfpu()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bfpu "))
        .stdout(predicate::str::is_match(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());
}

#[parameterized(
    program = { "program" },
    input = { "input" },
    speed = { "speed" },
    control = { "control" },
    step = { "step" },
)]
fn subcommand_help(command: &str) {
    bfpu()
        .args([command, "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bfpu"));
}

#[test]
fn unknown_command_fails() {
    bfpu()
        .arg("halt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
