// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client side of the control state machine.
//!
//! The server owns every control transition. The client only gates actions
//! with the legality table, and tracks which requests are in flight so
//! callers can avoid submitting the same action twice.

use std::sync::Mutex;

use bfpu_core::{ActionSet, ControlAction, ControlState, MachineState, ResourceKind, RunState};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Snapshot of everything a front-end needs to render controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub control_state: ControlState,
    pub run_state: Option<RunState>,
    /// Actions the machine accepts right now.
    pub legal: ActionSet,
    /// Actions whose request has not completed yet.
    pub pending: ActionSet,
    /// A take/release control request is in flight.
    pub toggle_pending: bool,
    /// Last control state observed while under control.
    pub last_controlled: Option<ControlState>,
}

impl ControlView {
    /// Legal and not already in flight.
    pub fn can_submit(&self, action: ControlAction) -> bool {
        self.legal.contains(action) && !self.pending.contains(action)
    }
}

#[derive(Debug, Default)]
struct Flags {
    pending: ActionSet,
    toggle_pending: bool,
    last_controlled: Option<ControlState>,
}

#[derive(Debug, Default)]
pub(crate) struct Controller {
    flags: Mutex<Flags>,
}

impl Controller {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a mirrored state snapshot.
    pub(crate) fn observe(&self, state: &MachineState) {
        if state.control_state.is_controlled() {
            self.lock().last_controlled = Some(state.control_state);
        }
    }

    /// Rejects `action` unless it is legal in the mirrored state.
    pub(crate) fn check(
        &self,
        state: Option<&MachineState>,
        action: ControlAction,
    ) -> ClientResult<()> {
        let state = state.ok_or(ClientError::NotInitialized(ResourceKind::State))?;
        let control_state = state.control_state;
        if !action.is_legal(control_state) {
            debug!("rejected {} while {}", action, control_state);
            return Err(ClientError::IllegalAction {
                action,
                state: control_state,
                allowed: ActionSet::legal_in(control_state).to_string(),
            });
        }
        Ok(())
    }

    /// Marks `action` in flight until the guard drops.
    pub(crate) fn begin(&self, action: ControlAction) -> PendingGuard<'_> {
        self.lock().pending.insert(action);
        PendingGuard {
            controller: self,
            action: Some(action),
        }
    }

    /// Marks a take/release control request in flight until the guard drops.
    pub(crate) fn begin_toggle(&self) -> PendingGuard<'_> {
        self.lock().toggle_pending = true;
        PendingGuard {
            controller: self,
            action: None,
        }
    }

    pub(crate) fn view(&self, state: Option<&MachineState>) -> Option<ControlView> {
        let state = state?;
        let flags = self.lock();
        Some(ControlView {
            control_state: state.control_state,
            run_state: state.run_state(),
            legal: ActionSet::legal_in(state.control_state),
            pending: flags.pending,
            toggle_pending: flags.toggle_pending,
            last_controlled: flags.last_controlled,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clears a pending flag on drop, whether the request succeeded or not.
pub(crate) struct PendingGuard<'a> {
    controller: &'a Controller,
    /// `None` for the control toggle.
    action: Option<ControlAction>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut flags = self.controller.lock();
        match self.action {
            Some(action) => flags.pending.remove(action),
            None => flags.toggle_pending = false,
        }
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
