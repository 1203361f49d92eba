// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::{ClientConfig, ClientError, Input, State};
use bfpu_core::ResourceKind;

use super::Session;
use crate::display;
use crate::error::Result;

pub async fn run(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let state = session.load::<State>().await?;
    let view = session
        .client()
        .control_view()
        .ok_or(ClientError::NotInitialized(ResourceKind::State))?;

    let input = if state.control_state.has_run() {
        Some(session.load::<Input>().await?)
    } else {
        None
    };

    let space = session.client().config().address_space;
    for line in display::status_lines(&state, &view, space, input.as_deref()) {
        println!("{}", line);
    }
    Ok(())
}
