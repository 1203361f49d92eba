// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Loading the client configuration.
//!
//! Configuration is read from `$XDG_CONFIG_HOME/bfpu/config.toml`, or the
//! file given with `--config`. Every key is optional:
//!
//! ```toml
//! origin = "http://bfpu.local:8000"
//! address_space = 32768
//! reconnect_initial_delay_ms = 100
//! reconnect_max_delay_secs = 30
//! report_capacity = 64
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bfpu_client::ClientConfig;
use tracing::debug;

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "bfpu";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config file location, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parses a config file's contents.
pub fn parse(content: &str) -> Result<ClientConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
}

/// Loads the configuration for one invocation.
///
/// An explicit `path` must exist; a missing default file means defaults.
/// `origin` overrides whatever the file says.
pub fn load(path: Option<&Path>, origin: Option<String>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => read(path)?,
        None => match default_path() {
            Some(path) => read_if_present(&path)?,
            None => ClientConfig::default(),
        },
    };
    if let Some(origin) = origin {
        config.origin = origin;
    }
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read config {}: {}", path.display(), e))
    })?;
    debug!("config loaded from {}", path.display());
    parse(&content)
}

fn read_if_present(path: &Path) -> Result<ClientConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!("config loaded from {}", path.display());
            parse(&content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(Error::Config(format!(
            "failed to read config {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
