// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The five mirrored remote resources and their endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DecodeError, Result};

/// Identifies one mirrored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Program text.
    Code,
    /// Pending input queue.
    Input,
    /// Accumulated output.
    Output,
    /// Machine state snapshot.
    State,
    /// Execution speed.
    Speed,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Code,
        ResourceKind::Input,
        ResourceKind::Output,
        ResourceKind::State,
        ResourceKind::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Code => "code",
            ResourceKind::Input => "input",
            ResourceKind::Output => "output",
            ResourceKind::State => "state",
            ResourceKind::Speed => "speed",
        }
    }

    /// Request/response path for the current value.
    pub fn fetch_path(&self) -> String {
        format!("/api/run/{}", self.as_str())
    }

    /// Push channel path.
    pub fn channel_path(&self) -> String {
        format!("/api/sse/{}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "code" | "program" => Ok(ResourceKind::Code),
            "input" => Ok(ResourceKind::Input),
            "output" => Ok(ResourceKind::Output),
            "state" => Ok(ResourceKind::State),
            "speed" => Ok(ResourceKind::Speed),
            _ => Err(DecodeError::UnknownResource(s.to_string())),
        }
    }
}

/// Execution speed, 1 (slowest) to 100 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Speed(value as u8))
        } else {
            Err(DecodeError::SpeedOutOfRange(value))
        }
    }

    pub fn get(&self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u32> for Speed {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self> {
        Speed::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> u32 {
        speed.get()
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Speed {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| DecodeError::NotAnInteger(trimmed.to_string()))?;
        Speed::new(value)
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
