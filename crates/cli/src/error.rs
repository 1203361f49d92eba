// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::ClientError;
use bfpu_core::ResourceKind;
use thiserror::Error;

/// Errors surfaced by the `bfpu` commands.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{resource} is unavailable: {message}\n  hint: is the server running at {origin}?")]
    Unavailable {
        resource: ResourceKind,
        message: String,
        origin: String,
    },

    #[error("no preset at index {index}\n  hint: {count} presets are available, see 'bfpu examples'")]
    PresetNotFound { index: usize, count: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for `bfpu` commands.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
