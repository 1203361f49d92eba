// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Machine state snapshot as reported by the server.
//!
//! Outside of a run the server only reports `control_state`, so every other
//! field is optional on the wire and decodes to its empty value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level control phase of the remote machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    /// Controlled, no run in progress.
    Idle,
    /// A run was requested and the hardware is starting up.
    Startup,
    /// A run is executing.
    Running,
    /// A run is in progress but halted between steps.
    Paused,
    /// Machine control is disabled; the hardware runs on its own.
    Uncontrolled,
}

impl ControlState {
    /// Every control state, in lifecycle order.
    pub const ALL: [ControlState; 5] = [
        ControlState::Idle,
        ControlState::Startup,
        ControlState::Running,
        ControlState::Paused,
        ControlState::Uncontrolled,
    ];

    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlState::Idle => "idle",
            ControlState::Startup => "startup",
            ControlState::Running => "running",
            ControlState::Paused => "paused",
            ControlState::Uncontrolled => "uncontrolled",
        }
    }

    /// True while a run exists, i.e. `run_state` carries meaning.
    pub fn has_run(&self) -> bool {
        matches!(self, ControlState::Running | ControlState::Paused)
    }

    /// True unless machine control is disabled.
    pub fn is_controlled(&self) -> bool {
        *self != ControlState::Uncontrolled
    }

    /// Whether the server accepts a new program in this state.
    ///
    /// Programs can only be replaced while no run is in progress.
    pub fn program_editable(&self) -> bool {
        matches!(self, ControlState::Idle | ControlState::Uncontrolled)
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ControlState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("unknown control state: '{s}'"))
    }
}

/// Execution sub-phase while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Default,
    /// Skipping forward to the matching loop end.
    Jumping,
    /// Blocked on an empty input queue.
    WaitInput,
    /// Output is waiting to be collected.
    OutputReady,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Default => "default",
            RunState::Jumping => "jumping",
            RunState::WaitInput => "wait_input",
            RunState::OutputReady => "output_ready",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Size of the machine's data address space.
///
/// This is a server contract constant; clients receive it from configuration
/// rather than assuming a width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct AddressSpace(usize);

impl AddressSpace {
    /// Tape length of the reference server.
    pub const DEFAULT_SIZE: usize = 0x8000;

    /// Creates an address space of `size` cells. Zero is rejected.
    pub fn new(size: usize) -> Option<Self> {
        (size > 0).then_some(AddressSpace(size))
    }

    pub fn size(&self) -> usize {
        self.0
    }

    /// Wraps a possibly negative address into the space.
    pub fn wrap(&self, addr: i64) -> usize {
        // usize -> i64 cannot overflow for any realistic tape length
        addr.rem_euclid(self.0 as i64) as usize
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        AddressSpace(Self::DEFAULT_SIZE)
    }
}

impl TryFrom<usize> for AddressSpace {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        AddressSpace::new(size).ok_or_else(|| "address space must not be empty".to_string())
    }
}

impl From<AddressSpace> for usize {
    fn from(space: AddressSpace) -> usize {
        space.0
    }
}

/// Decoded view of the code around the program counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeView {
    pub pc: usize,
    /// Program index of the first fragment character.
    pub offset: usize,
    pub fragment: String,
}

impl CodeView {
    /// Position of the program counter inside `fragment`, if it lies there.
    pub fn cursor(&self) -> Option<usize> {
        self.pc
            .checked_sub(self.offset)
            .filter(|&index| index < self.fragment.chars().count())
    }
}

/// The authoritative execution snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    /// Window of data memory centred on `head`.
    #[serde(default)]
    pub tape: Vec<u8>,
    #[serde(default)]
    pub head: usize,
    #[serde(default)]
    pub code: CodeView,
    /// Number of input bytes already consumed.
    #[serde(default)]
    pub ic: usize,
    #[serde(default)]
    pub jumping: Option<usize>,
    /// Loop return addresses, most recent last.
    #[serde(default)]
    pub stack: Vec<usize>,
    #[serde(default)]
    pub cycles: u64,
    #[serde(default, rename = "run_state", skip_serializing_if = "Option::is_none")]
    run: Option<RunState>,
    pub control_state: ControlState,
}

impl MachineState {
    /// A snapshot carrying only a control state, as sent outside of a run.
    pub fn new(control_state: ControlState) -> Self {
        MachineState {
            tape: Vec::new(),
            head: 0,
            code: CodeView::default(),
            ic: 0,
            jumping: None,
            stack: Vec::new(),
            cycles: 0,
            run: None,
            control_state,
        }
    }

    /// Sets the run sub-phase.
    pub fn with_run_state(mut self, run_state: RunState) -> Self {
        self.run = Some(run_state);
        self
    }

    /// Run sub-phase, only defined while running or paused.
    pub fn run_state(&self) -> Option<RunState> {
        if self.control_state.has_run() {
            self.run
        } else {
            None
        }
    }

    /// Tape window as `(address, value)` pairs, addresses wrapped into `space`.
    pub fn tape_window(&self, space: AddressSpace) -> Vec<(usize, u8)> {
        let start = self.head as i64 - (self.tape.len() / 2) as i64;
        self.tape
            .iter()
            .enumerate()
            .map(|(i, &value)| (space.wrap(start + i as i64), value))
            .collect()
    }

    /// Stack entries wrapped into `space`.
    pub fn stack_addresses(&self, space: AddressSpace) -> Vec<usize> {
        self.stack
            .iter()
            .map(|&addr| space.wrap(addr as i64))
            .collect()
    }

    /// The part of `input` the machine has already read.
    pub fn consumed_input<'a>(&self, input: &'a str) -> &'a str {
        let mut end = self.ic.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        &input[..end]
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
