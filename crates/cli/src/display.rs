// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text rendering of mirrored values.

use bfpu_client::ControlView;
use bfpu_core::{AddressSpace, CodeView, Example, MachineState, ResourceKind};

/// Control line, e.g. `running (wait_input)`.
pub fn control_summary(view: &ControlView) -> String {
    match view.run_state {
        Some(run_state) => format!("{} ({})", view.control_state, run_state.as_str()),
        None => view.control_state.to_string(),
    }
}

/// Tape window as `addr:value` cells, the head cell in brackets.
pub fn tape_line(state: &MachineState, space: AddressSpace) -> String {
    let head = space.wrap(state.head as i64);
    state
        .tape_window(space)
        .into_iter()
        .map(|(addr, value)| {
            if addr == head {
                format!("[{:04x}:{:02x}]", addr, value)
            } else {
                format!("{:04x}:{:02x}", addr, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The code fragment, plus a caret line under the program counter if it
/// falls inside the fragment.
pub fn code_lines(code: &CodeView) -> Vec<String> {
    let mut lines = vec![code.fragment.clone()];
    if let Some(cursor) = code.cursor() {
        lines.push(format!("{}^", " ".repeat(cursor)));
    }
    lines
}

/// Legal actions; ones whose request is still in flight are marked.
pub fn allowed_line(view: &ControlView) -> String {
    if view.legal.is_empty() {
        return view.legal.to_string();
    }
    view.legal
        .iter()
        .map(|action| {
            if view.can_submit(action) {
                action.to_string()
            } else {
                format!("{} (pending)", action)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Input split at the read position.
pub fn input_line(state: &MachineState, input: &str) -> String {
    let consumed = state.consumed_input(input);
    format!("{:?} read, {:?} left", consumed, &input[consumed.len()..])
}

/// Full `bfpu status` report. `input` is shown split at the read position
/// when given.
pub fn status_lines(
    state: &MachineState,
    view: &ControlView,
    space: AddressSpace,
    input: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![format!("control: {}", control_summary(view))];
    if state.control_state.has_run() {
        lines.push(format!("cycles:  {}", state.cycles));
        lines.push(format!("head:    {:04x}", space.wrap(state.head as i64)));
        match input {
            Some(input) => lines.push(format!("input:   {}", input_line(state, input))),
            None => lines.push(format!("input:   {} consumed", state.ic)),
        }
        if let Some(depth) = state.jumping {
            lines.push(format!("jumping: depth {}", depth));
        }
        if !state.stack.is_empty() {
            let stack: Vec<String> = state
                .stack_addresses(space)
                .iter()
                .map(|addr| format!("{:04x}", addr))
                .collect();
            lines.push(format!("stack:   {}", stack.join(" ")));
        }
        if !state.tape.is_empty() {
            lines.push(format!("tape:    {}", tape_line(state, space)));
        }
        if !state.code.fragment.is_empty() {
            for (i, line) in code_lines(&state.code).into_iter().enumerate() {
                let label = if i == 0 { "code:" } else { "" };
                lines.push(format!("{:<9}{}", label, line));
            }
        }
    }
    lines.push(format!("allowed: {}", allowed_line(view)));
    lines
}

/// One `bfpu watch` line for a text resource.
pub fn text_event(resource: ResourceKind, text: &str) -> String {
    format!("{}: {:?}", resource, text)
}

/// One `bfpu watch` line for a state snapshot.
pub fn state_event(state: &MachineState) -> String {
    match state.run_state() {
        Some(run_state) => format!(
            "state: {} ({}) cycles={} head={}",
            state.control_state,
            run_state.as_str(),
            state.cycles,
            state.head
        ),
        None => format!("state: {}", state.control_state),
    }
}

/// Preset listing; presets matching the loaded program are starred.
pub fn example_lines(examples: &[Example], matching: &[usize]) -> Vec<String> {
    let width = examples.iter().map(|e| e.name.len()).max().unwrap_or(0);
    examples
        .iter()
        .enumerate()
        .map(|(index, example)| {
            let marker = if matching.contains(&index) { '*' } else { ' ' };
            format!(
                "{} {:>2}  {:<width$}  {}",
                marker,
                index,
                example.name,
                example.desc,
                width = width
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
