// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::Read;

use bfpu_client::{ClientConfig, Code};

use super::Session;
use crate::error::{Error, Result};

pub async fn show(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let program = session.load::<Code>().await?;
    println!("{}", program);
    Ok(())
}

/// Writes the contents of `source`, a path or `-` for stdin.
pub async fn write(config: ClientConfig, source: &str) -> Result<()> {
    let code = read_source(source)?;
    let session = Session::new(config)?;
    session.client().set_program(&code).await?;
    Ok(())
}

pub async fn preset(config: ClientConfig, index: usize) -> Result<()> {
    let session = Session::new(config)?;
    let examples = session.client().examples().await?;
    let example = examples.get(index).ok_or(Error::PresetNotFound {
        index,
        count: examples.len(),
    })?;
    session.client().set_program(&example.code).await?;
    println!("loaded preset {}: {}", index, example.name);
    Ok(())
}

pub(crate) fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        Ok(code)
    } else {
        Ok(fs::read_to_string(source)?)
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
