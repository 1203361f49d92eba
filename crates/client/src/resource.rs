// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed handles for the five mirrored resources.
//!
//! Each marker type ties a [`ResourceKind`] to its value type and decoders,
//! so subscriptions and reads are checked at compile time.

use std::fmt;

use bfpu_core::{wire, DecodeError, MachineState, ResourceKind, Speed as SpeedValue};

use crate::mirror::Mirror;

/// A mirrored remote resource.
pub trait Resource: Send + Sync + 'static {
    type Value: Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: ResourceKind;

    /// Decodes the body of a fetch response.
    fn decode_fetched(body: &str) -> Result<Self::Value, DecodeError>;

    /// Decodes a push message payload.
    fn decode_pushed(payload: &str) -> Result<Self::Value, DecodeError>;

    /// This resource's mirror.
    fn mirror(mirrors: &Mirrors) -> &Mirror<Self::Value>;
}

/// Program text.
pub struct Code;
/// Pending input queue.
pub struct Input;
/// Accumulated output text.
pub struct Output;
/// Machine state snapshot.
pub struct State;
/// Execution speed.
pub struct Speed;

/// One mirror per resource.
pub struct Mirrors {
    code: Mirror<String>,
    input: Mirror<String>,
    output: Mirror<String>,
    state: Mirror<MachineState>,
    speed: Mirror<SpeedValue>,
}

impl Mirrors {
    pub fn new() -> Self {
        Mirrors {
            code: Mirror::new(ResourceKind::Code),
            input: Mirror::new(ResourceKind::Input),
            output: Mirror::new(ResourceKind::Output),
            state: Mirror::new(ResourceKind::State),
            speed: Mirror::new(ResourceKind::Speed),
        }
    }

    pub fn get<R: Resource>(&self) -> &Mirror<R::Value> {
        R::mirror(self)
    }
}

impl Default for Mirrors {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! text_resource {
    ($marker:ident, $kind:ident, $field:ident) => {
        impl Resource for $marker {
            type Value = String;

            const KIND: ResourceKind = ResourceKind::$kind;

            fn decode_fetched(body: &str) -> Result<String, DecodeError> {
                Ok(body.to_string())
            }

            fn decode_pushed(payload: &str) -> Result<String, DecodeError> {
                Ok(wire::text_from_push(payload))
            }

            fn mirror(mirrors: &Mirrors) -> &Mirror<String> {
                &mirrors.$field
            }
        }
    };
}

text_resource!(Code, Code, code);
text_resource!(Input, Input, input);
text_resource!(Output, Output, output);

impl Resource for State {
    type Value = MachineState;

    const KIND: ResourceKind = ResourceKind::State;

    fn decode_fetched(body: &str) -> Result<MachineState, DecodeError> {
        wire::state(body)
    }

    fn decode_pushed(payload: &str) -> Result<MachineState, DecodeError> {
        wire::state(payload)
    }

    fn mirror(mirrors: &Mirrors) -> &Mirror<MachineState> {
        &mirrors.state
    }
}

impl Resource for Speed {
    type Value = SpeedValue;

    const KIND: ResourceKind = ResourceKind::Speed;

    fn decode_fetched(body: &str) -> Result<SpeedValue, DecodeError> {
        wire::speed(body)
    }

    fn decode_pushed(payload: &str) -> Result<SpeedValue, DecodeError> {
        wire::speed(payload)
    }

    fn mirror(mirrors: &Mirrors) -> &Mirror<SpeedValue> {
        &mirrors.speed
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
