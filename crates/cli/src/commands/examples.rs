// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::{ClientConfig, Code};

use super::Session;
use crate::display;
use crate::error::Result;

pub async fn run(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let examples = session.client().examples().await?;
    session.load::<Code>().await?;

    let matching = session.client().matching_examples();
    for line in display::example_lines(&examples, &matching) {
        println!("{}", line);
    }
    Ok(())
}
