// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! The CLI reads it from `config.toml`; library users can build it directly.

use std::time::Duration;

use bfpu_core::AddressSpace;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::transport::ReconnectPolicy;

/// Configuration for the run client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin all API paths are relative to, e.g. `http://bfpu.local:8000`.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Size of the machine's data address space.
    ///
    /// Must match the server; revisions of the server have used both
    /// 0x8000 and 0x10000.
    #[serde(default)]
    pub address_space: AddressSpace,
    /// First delay before reconnecting a dropped push channel (default: 100).
    #[serde(default = "default_reconnect_initial_delay_ms")]
    pub reconnect_initial_delay_ms: u64,
    /// Maximum delay between reconnection attempts in seconds (default: 30).
    #[serde(default = "default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
    /// Reports buffered per error subscriber before old ones are dropped.
    #[serde(default = "default_report_capacity")]
    pub report_capacity: usize,
}

fn default_origin() -> String {
    "http://localhost:8000".to_string()
}

fn default_reconnect_initial_delay_ms() -> u64 {
    100
}

fn default_reconnect_max_delay_secs() -> u64 {
    30
}

fn default_report_capacity() -> usize {
    64
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            origin: default_origin(),
            address_space: AddressSpace::default(),
            reconnect_initial_delay_ms: default_reconnect_initial_delay_ms(),
            reconnect_max_delay_secs: default_reconnect_max_delay_secs(),
            report_capacity: default_report_capacity(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `origin`, everything else default.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        ClientConfig {
            origin: origin.into(),
            ..Self::default()
        }
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            initial_delay: Duration::from_millis(self.reconnect_initial_delay_ms),
            max_delay: Duration::from_secs(self.reconnect_max_delay_secs),
        }
    }

    /// Checks the values that cannot be expressed in the types.
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "origin must start with http:// or https://, got '{}'",
                self.origin
            )));
        }
        if self.reconnect_initial_delay_ms == 0 {
            return Err(ClientError::Config(
                "reconnect_initial_delay_ms must be positive".to_string(),
            ));
        }
        if self.report_capacity == 0 {
            return Err(ClientError::Config(
                "report_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
