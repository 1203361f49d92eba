// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Control actions and the legality table that gates them.
//!
//! | state        | play | pause | step | reset |
//! |--------------|------|-------|------|-------|
//! | idle         | yes  | no    | yes  | yes   |
//! | startup      | no   | no    | no   | yes   |
//! | running      | no   | yes   | no   | yes   |
//! | paused       | yes  | no    | yes  | yes   |
//! | uncontrolled | no   | no    | no   | no    |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::ControlState;

/// A stateless command submitted to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Play,
    Pause,
    Step,
    Reset,
}

impl ControlAction {
    pub const ALL: [ControlAction; 4] = [
        ControlAction::Play,
        ControlAction::Pause,
        ControlAction::Step,
        ControlAction::Reset,
    ];

    /// User-facing name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Play => "play",
            ControlAction::Pause => "pause",
            ControlAction::Step => "step",
            ControlAction::Reset => "reset",
        }
    }

    /// Path segment under `/api/ctrl/`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ControlAction::Play => "start",
            ControlAction::Pause => "pause",
            ControlAction::Step => "step",
            ControlAction::Reset => "reset",
        }
    }

    /// Whether the action may be submitted while the machine is in `state`.
    pub fn is_legal(&self, state: ControlState) -> bool {
        use ControlState::*;
        match self {
            ControlAction::Play | ControlAction::Step => matches!(state, Idle | Paused),
            ControlAction::Pause => state == Running,
            ControlAction::Reset => state != Uncontrolled,
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A small set of control actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn empty() -> Self {
        ActionSet(0)
    }

    /// The actions legal in `state`.
    pub fn legal_in(state: ControlState) -> Self {
        ControlAction::ALL
            .into_iter()
            .filter(|action| action.is_legal(state))
            .collect()
    }

    pub fn contains(&self, action: ControlAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn insert(&mut self, action: ControlAction) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: ControlAction) {
        self.0 &= !action.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ControlAction> + '_ {
        ControlAction::ALL
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl FromIterator<ControlAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ControlAction>>(iter: I) -> Self {
        let mut set = ActionSet::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|action| action.as_str()).collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
