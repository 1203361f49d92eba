// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file loading.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn bfpu(config_home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("bfpu");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("BFPU_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn write_default_config(home: &TempDir, content: &str) {
    let dir = home.path().join("bfpu");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn unknown_key_is_rejected() {
    let home = TempDir::new().unwrap();
    write_default_config(&home, "orign = \"http://127.0.0.1:1\"\n");
    bfpu(&home)
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: config error"))
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["status", "--config"])
        .arg(home.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn origin_must_be_http() {
    let home = TempDir::new().unwrap();
    bfpu(&home)
        .args(["status", "--origin", "ftp://127.0.0.1:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "origin must start with http:// or https://",
        ));
}

#[test]
fn origin_from_config_file_is_used() {
    let home = TempDir::new().unwrap();
    write_default_config(&home, "origin = \"http://127.0.0.1:1\"\n");
    bfpu(&home)
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http://127.0.0.1:1"));
}
