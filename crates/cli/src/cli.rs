// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use bfpu_core::{ResourceKind, Speed};
use clap::{Parser, Subcommand};

const QUICKSTART_HELP: &str = "\
Get started:
  bfpu status                    Show the machine state
  bfpu program write prog.bf     Load a program
  bfpu control on                Take control of the machine
  bfpu play                      Start running
  bfpu watch -r output           Follow the output";

#[derive(Parser)]
#[command(name = "bfpu", version)]
#[command(about = "Control and observe a remote tape machine")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Server origin, e.g. http://localhost:8000 (overrides the config file)
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show control state, registers and the tape around the head
    Status,

    /// Print every change of the selected resources until interrupted
    Watch {
        /// Resource to follow (code, input, output, state, speed); repeatable
        #[arg(long = "resource", short = 'r', value_parser = parse_resource)]
        resources: Vec<ResourceKind>,
    },

    /// Show or replace the program
    Program {
        #[command(subcommand)]
        command: ProgramCommand,
    },

    /// Show or replace the pending input
    Input {
        #[command(subcommand)]
        command: InputCommand,
    },

    /// Show the output produced so far
    Output,

    /// Show or set the execution speed
    Speed {
        #[command(subcommand)]
        command: SpeedCommand,
    },

    /// Take or release control of the machine
    Control {
        #[command(subcommand)]
        command: ControlCommand,
    },

    /// Start or resume execution
    Play,

    /// Pause a running machine
    Pause,

    /// Execute single steps
    Step {
        /// Number of steps (default: 1)
        count: Option<u32>,
    },

    /// Reset the machine
    Reset,

    /// List preset programs, marking the one currently loaded
    Examples,
}

#[derive(Subcommand)]
pub enum ProgramCommand {
    /// Print the current program
    Show,
    /// Replace the program with the contents of a file ('-' for stdin)
    Write { source: String },
    /// Replace the program with a preset from 'bfpu examples'
    Preset { index: usize },
}

#[derive(Subcommand)]
pub enum InputCommand {
    /// Print the pending input
    Show,
    /// Replace the pending input
    Set { text: String },
    /// Remove all pending input
    Clear,
}

#[derive(Subcommand)]
pub enum SpeedCommand {
    /// Print the current speed
    Show,
    /// Set the speed, 1 (slowest) to 100 (fastest)
    Set {
        #[arg(value_parser = parse_speed)]
        speed: Speed,
    },
}

#[derive(Subcommand)]
pub enum ControlCommand {
    /// Take control
    On,
    /// Release control
    Off,
    /// Take control if released, release it otherwise
    Toggle,
}

fn parse_speed(value: &str) -> Result<Speed, String> {
    value.parse().map_err(|e: bfpu_core::DecodeError| e.to_string())
}

fn parse_resource(value: &str) -> Result<ResourceKind, String> {
    value
        .parse()
        .map_err(|e: bfpu_core::DecodeError| e.to_string())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
