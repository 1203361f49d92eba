// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Speed arguments are validated before anything is sent.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use yare::parameterized;

fn bfpu(config_home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("bfpu");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("BFPU_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

#[parameterized(
    zero = { "0" },
    above_max = { "101" },
    huge = { "4294967296" },
)]
fn out_of_range_speed_is_rejected(value: &str) {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["speed", "set", value, "--origin", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("request failed").not());
}

#[test]
fn out_of_range_hint_names_bounds() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["speed", "set", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("speed must be between 1 and 100"));
}

#[test]
fn non_integer_speed_is_rejected() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["speed", "set", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer: 'fast'"));
}

#[test]
fn valid_speed_reaches_the_network() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["speed", "set", "50", "--origin", "http://127.0.0.1:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: request failed"));
}
