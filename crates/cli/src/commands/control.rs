// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::{ClientConfig, State};
use bfpu_core::ControlAction;

use super::Session;
use crate::error::Result;

/// Takes (`true`) or releases (`false`) control.
pub async fn set(config: ClientConfig, control: bool) -> Result<()> {
    let session = Session::new(config)?;
    session.client().set_control(control).await?;
    Ok(())
}

pub async fn toggle(config: ClientConfig) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    let state = session.load::<State>().await?;
    session.client().toggle_control().await?;
    let verb = if state.control_state.is_controlled() {
        "released"
    } else {
        "taken"
    };
    println!("control {}", verb);
    Ok(())
}

/// Submits `action`; `steps` only applies to [`ControlAction::Step`].
pub async fn action(config: ClientConfig, action: ControlAction, steps: Option<u32>) -> Result<()> {
    let mut session = Session::new(config)?;
    session.connect()?;
    session.load::<State>().await?;

    let client = session.client();
    match action {
        ControlAction::Step => client.step(steps).await?,
        _ => client.control_action(action).await?,
    }
    println!("{} requested", action);
    Ok(())
}
