// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bfpu-core operations.

use thiserror::Error;

/// Failure to turn a wire payload into a typed value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not an integer: '{0}'")]
    NotAnInteger(String),

    #[error("speed out of range: {0}\n  hint: speed must be between 1 and 100")]
    SpeedOutOfRange(u32),

    #[error("unknown resource: '{0}'\n  hint: valid resources are: code, input, output, state, speed")]
    UnknownResource(String),
}

/// A specialized Result type for bfpu-core decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
