// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::ClientConfig;
use bfpu_core::Speed;

use super::Session;
use crate::error::Result;

pub async fn show(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let speed = session.load::<bfpu_client::Speed>().await?;
    println!("{}", speed);
    Ok(())
}

/// `speed` was range-checked while parsing arguments.
pub async fn set(config: ClientConfig, speed: Speed) -> Result<()> {
    let session = Session::new(config)?;
    session.client().set_speed(speed).await?;
    Ok(())
}
