// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bfpu - command-line front-end for a remote tape machine.
//!
//! Every command builds a [`bfpu_client::RunClient`] from the loaded
//! configuration, runs on a fresh tokio runtime, and prints plain text.

mod cli;
mod commands;
mod display;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command, ControlCommand, InputCommand, ProgramCommand, SpeedCommand};
pub use error::{Error, Result};

use bfpu_client::ClientConfig;
use bfpu_core::ControlAction;

/// Runs one invocation.
pub fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref(), cli.origin)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;
    runtime.block_on(dispatch(cli.command, config))
}

async fn dispatch(command: Command, config: ClientConfig) -> Result<()> {
    match command {
        Command::Status => commands::status::run(config).await,
        Command::Watch { resources } => commands::watch::run(config, resources).await,
        Command::Program { command } => match command {
            ProgramCommand::Show => commands::program::show(config).await,
            ProgramCommand::Write { source } => commands::program::write(config, &source).await,
            ProgramCommand::Preset { index } => commands::program::preset(config, index).await,
        },
        Command::Input { command } => match command {
            InputCommand::Show => commands::io::show_input(config).await,
            InputCommand::Set { text } => commands::io::set_input(config, &text).await,
            InputCommand::Clear => commands::io::clear_input(config).await,
        },
        Command::Output => commands::io::show_output(config).await,
        Command::Speed { command } => match command {
            SpeedCommand::Show => commands::speed::show(config).await,
            SpeedCommand::Set { speed } => commands::speed::set(config, speed).await,
        },
        Command::Control { command } => match command {
            ControlCommand::On => commands::control::set(config, true).await,
            ControlCommand::Off => commands::control::set(config, false).await,
            ControlCommand::Toggle => commands::control::toggle(config).await,
        },
        Command::Play => commands::control::action(config, ControlAction::Play, None).await,
        Command::Pause => commands::control::action(config, ControlAction::Pause, None).await,
        Command::Step { count } => {
            commands::control::action(config, ControlAction::Step, count).await
        }
        Command::Reset => commands::control::action(config, ControlAction::Reset, None).await,
        Command::Examples => commands::examples::run(config).await,
    }
}
