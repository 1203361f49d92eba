// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for client operations.

use bfpu_core::{ControlAction, ControlState, DecodeError, ResourceKind};
use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("{}", status_message(*status, status_text, body.as_deref()))]
    Status {
        status: u16,
        status_text: String,
        /// Failure reason sent by the server, if any.
        body: Option<String>,
    },

    /// The request could not be sent or its response not read.
    #[error("request failed: {0}")]
    Request(String),

    /// A push channel failed or dropped.
    #[error("channel error: {0}")]
    Channel(String),
}

fn status_message(status: u16, status_text: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("{status}: {status_text} ({body})"),
        None => format!("{status}: {status_text}"),
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("{action} is not allowed while the machine is {state}\n  hint: allowed now: {allowed}")]
    IllegalAction {
        action: ControlAction,
        state: ControlState,
        allowed: String,
    },

    #[error("{0} is not loaded yet")]
    NotInitialized(ResourceKind),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no async runtime: {0}")]
    NoRuntime(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
