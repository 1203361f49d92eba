// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Payload decoding for fetch responses and push messages.
//!
//! Fetch responses carry text resources verbatim. Push messages are JSON
//! encoded by the server, so text resources usually arrive as JSON strings;
//! a payload that is not a JSON string is taken verbatim.

use crate::error::{DecodeError, Result};
use crate::example::Example;
use crate::resource::Speed;
use crate::state::MachineState;

/// Decodes a text resource (code, input, output) from a push message.
///
/// Assumes the server JSON-encodes every push. A payload that parses as a
/// JSON string is always unwrapped, so a raw-text server sending the
/// program `"+"` (quotes included) would be mirrored as `+`. Only payloads
/// that are not a JSON string fall back to the raw text.
pub fn text_from_push(payload: &str) -> String {
    match serde_json::from_str::<String>(payload) {
        Ok(text) => text,
        Err(_) => payload.to_string(),
    }
}

/// Decodes a machine state snapshot.
pub fn state(payload: &str) -> Result<MachineState> {
    Ok(serde_json::from_str(payload)?)
}

/// Decodes a speed value; the server sends a bare integer.
pub fn speed(payload: &str) -> Result<Speed> {
    payload.parse()
}

/// Decodes the preset catalog.
pub fn examples(payload: &str) -> Result<Vec<Example>> {
    serde_json::from_str(payload).map_err(DecodeError::from)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
