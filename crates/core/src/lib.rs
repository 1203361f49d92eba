// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bfpu-core: Shared data model for the bfpu client
//!
//! This crate provides the machine state snapshot, control actions and their
//! legality table, preset programs, and wire decoding used by the client
//! library and the `bfpu` CLI.

pub mod action;
pub mod error;
pub mod example;
pub mod resource;
pub mod state;
pub mod wire;

pub use action::{ActionSet, ControlAction};
pub use error::{DecodeError, Result};
pub use example::{matching_presets, Example};
pub use resource::{ResourceKind, Speed};
pub use state::{AddressSpace, CodeView, ControlState, MachineState, RunState};
