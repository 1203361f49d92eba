// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only catalog of preset programs.

use bfpu_core::{wire, Example};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::transport::{Method, Transport};

pub(crate) const EXAMPLES_PATH: &str = "/api/examples";

/// Fetched once and cached; a failed fetch is retried by the next caller.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    cell: OnceCell<Vec<Example>>,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The catalog, fetching it on first use.
    ///
    /// Concurrent first callers share a single request.
    pub(crate) async fn get<T: Transport>(&self, transport: &T) -> ClientResult<&[Example]> {
        let examples = self
            .cell
            .get_or_try_init(|| async {
                let response = transport.request(Method::Get, EXAMPLES_PATH, None).await?;
                let examples = wire::examples(&response.body)?;
                debug!("loaded {} presets", examples.len());
                Ok::<_, ClientError>(examples)
            })
            .await?;
        Ok(examples)
    }

    /// The catalog if it was already loaded.
    pub(crate) fn cached(&self) -> Option<&[Example]> {
        self.cell.get().map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
