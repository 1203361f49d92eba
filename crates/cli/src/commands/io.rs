// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input queue and output text.

use bfpu_client::{ClientConfig, Input, Output};

use super::Session;
use crate::error::Result;

pub async fn show_input(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let input = session.load::<Input>().await?;
    print_text(&input);
    Ok(())
}

pub async fn set_input(config: ClientConfig, text: &str) -> Result<()> {
    let session = Session::new(config)?;
    session.client().set_input(text).await?;
    Ok(())
}

pub async fn clear_input(config: ClientConfig) -> Result<()> {
    let session = Session::new(config)?;
    session.client().clear_input().await?;
    Ok(())
}

pub async fn show_output(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let output = session.load::<Output>().await?;
    print_text(&output);
    Ok(())
}

fn print_text(text: &str) {
    if text.is_empty() || text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
