// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `BFPU_LOG=bfpu_client=debug`.
pub const LOG_ENV: &str = "BFPU_LOG";

/// Filter used when `BFPU_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the stderr subscriber. `-v` takes precedence over `BFPU_LOG`.
pub fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
