// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

use super::ControlAction::{Pause, Play, Reset, Step};
use crate::state::ControlState::{Idle, Paused, Running, Startup, Uncontrolled};

#[parameterized(
    play_idle = { Play, Idle, true },
    play_startup = { Play, Startup, false },
    play_running = { Play, Running, false },
    play_paused = { Play, Paused, true },
    play_uncontrolled = { Play, Uncontrolled, false },
    pause_idle = { Pause, Idle, false },
    pause_startup = { Pause, Startup, false },
    pause_running = { Pause, Running, true },
    pause_paused = { Pause, Paused, false },
    pause_uncontrolled = { Pause, Uncontrolled, false },
    step_idle = { Step, Idle, true },
    step_startup = { Step, Startup, false },
    step_running = { Step, Running, false },
    step_paused = { Step, Paused, true },
    step_uncontrolled = { Step, Uncontrolled, false },
    reset_idle = { Reset, Idle, true },
    reset_startup = { Reset, Startup, true },
    reset_running = { Reset, Running, true },
    reset_paused = { Reset, Paused, true },
    reset_uncontrolled = { Reset, Uncontrolled, false },
)]
fn legality_table(action: ControlAction, state: ControlState, legal: bool) {
    assert_eq!(action.is_legal(state), legal);
    assert_eq!(ActionSet::legal_in(state).contains(action), legal);
}

#[test]
fn nothing_is_legal_while_uncontrolled() {
    assert!(ActionSet::legal_in(Uncontrolled).is_empty());
}

#[parameterized(
    play = { Play, "start" },
    pause = { Pause, "pause" },
    step = { Step, "step" },
    reset = { Reset, "reset" },
)]
fn endpoint_segment(action: ControlAction, expected: &str) {
    assert_eq!(action.endpoint(), expected);
}

#[test]
fn action_set_insert_remove() {
    let mut set = ActionSet::empty();
    set.insert(Step);
    set.insert(Reset);
    assert!(set.contains(Step));
    assert!(!set.contains(Play));

    set.remove(Step);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![Reset]);
}

#[test]
fn action_set_display() {
    assert_eq!(ActionSet::legal_in(Idle).to_string(), "play, step, reset");
    assert_eq!(ActionSet::empty().to_string(), "none");
}
