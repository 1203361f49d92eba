// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Preset example programs.
//!
//! Presets have no stable id; a preset is identified by its index in the
//! catalog it was fetched with.

use serde::{Deserialize, Serialize};

/// An immutable preset program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    pub desc: String,
    pub code: String,
}

/// Indices of the presets whose code equals `program`.
///
/// This is content equality, so it is only good for highlighting.
pub fn matching_presets(catalog: &[Example], program: &str) -> Vec<usize> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, example)| example.code == program)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
#[path = "example_tests.rs"]
mod tests;
