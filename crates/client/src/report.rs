// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide error reporting.
//!
//! Every failed request and every push channel failure is logged and
//! broadcast here, so a host application can surface them in one place.
//! Failures of calls made by a consumer are reported and also returned to
//! the caller. Reporting never blocks; with no subscriber a report is only
//! logged.

use std::fmt;

use bfpu_core::{DecodeError, ResourceKind};
use tokio::sync::broadcast;
use tracing::warn;

use crate::error::{ClientError, TransportError};
use crate::transport::Method;

/// Class of a reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// A request failed.
    Transport,
    /// A push channel failed or dropped.
    Channel,
    /// A payload could not be decoded and was discarded.
    Decode,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Transport => "transport",
            ReportKind::Channel => "channel",
            ReportKind::Decode => "decode",
        };
        write!(f, "{}", name)
    }
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// `None` for control and preset requests.
    pub resource: Option<ResourceKind>,
    pub kind: ReportKind,
    pub message: String,
}

impl Report {
    pub fn transport(resource: ResourceKind, error: &TransportError) -> Self {
        let kind = match error {
            TransportError::Channel(_) => ReportKind::Channel,
            _ => ReportKind::Transport,
        };
        Report {
            resource: Some(resource),
            kind,
            message: error.to_string(),
        }
    }

    pub fn decode(resource: ResourceKind, error: &DecodeError) -> Self {
        Report {
            resource: Some(resource),
            kind: ReportKind::Decode,
            message: error.to_string(),
        }
    }

    /// A failed call that belongs to no mirrored resource.
    pub fn request(method: Method, path: &str, error: &ClientError) -> Self {
        let kind = match error {
            ClientError::Decode(_) => ReportKind::Decode,
            ClientError::Transport(TransportError::Channel(_)) => ReportKind::Channel,
            _ => ReportKind::Transport,
        };
        Report {
            resource: None,
            kind,
            message: format!("{} {}: {}", method, path, error),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resource {
            Some(resource) => write!(f, "{} {} error: {}", resource, self.kind, self.message),
            None => write!(f, "{} error: {}", self.kind, self.message),
        }
    }
}

/// Fire-and-forget broadcast of [`Report`]s.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    tx: broadcast::Sender<Report>,
}

impl ErrorReporter {
    /// `capacity` bounds how far a slow subscriber may lag; must be positive.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        ErrorReporter { tx }
    }

    pub fn report(&self, report: Report) {
        warn!("{}", report);
        let _ = self.tx.send(report);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Report> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
