// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod control;
pub mod examples;
pub mod io;
pub mod program;
pub mod speed;
pub mod status;
pub mod watch;

use bfpu_client::{ClientConfig, Report, ReportKind, Resource, RunClient};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

use crate::error::{Error, Result};

/// A client plus the error reports it has produced since it was created.
pub struct Session {
    client: RunClient,
    errors: broadcast::Receiver<Report>,
}

impl Session {
    /// Creates a client without connecting it.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = RunClient::new(config)?;
        let errors = client.errors();
        Ok(Session { client, errors })
    }

    /// Starts mirroring; subscribe before this to see initial values.
    pub fn connect(&self) -> Result<()> {
        self.client.connect()?;
        Ok(())
    }

    pub fn client(&self) -> &RunClient {
        &self.client
    }

    /// Next background failure.
    pub async fn next_report(&mut self) -> Option<Report> {
        next_report(&mut self.errors).await
    }

    /// Waits for `R`, failing if its initial fetch fails.
    ///
    /// Channel drops are not fatal here; the channel keeps reconnecting.
    pub async fn load<R: Resource>(&mut self) -> Result<R::Value> {
        let origin = self.client.config().origin.clone();
        let unavailable = |message: String| Error::Unavailable {
            resource: R::KIND,
            message,
            origin: origin.clone(),
        };

        let wait = self.client.wait::<R>();
        tokio::pin!(wait);
        loop {
            tokio::select! {
                value = &mut wait => {
                    return value.ok_or_else(|| unavailable("client closed".to_string()));
                }
                report = next_report(&mut self.errors) => match report {
                    Some(report) if report.resource == Some(R::KIND) && report.kind != ReportKind::Channel => {
                        return Err(unavailable(report.message));
                    }
                    Some(report) => debug!("ignoring report while loading: {}", report),
                    None => return Err(unavailable("client closed".to_string())),
                },
            }
        }
    }
}

/// Lagged reports are skipped.
async fn next_report(errors: &mut broadcast::Receiver<Report>) -> Option<Report> {
    loop {
        match errors.recv().await {
            Ok(report) => return Some(report),
            Err(RecvError::Lagged(skipped)) => debug!("skipped {} reports", skipped),
            Err(RecvError::Closed) => return None,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.client.shutdown();
    }
}
