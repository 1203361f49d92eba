// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental `text/event-stream` parser.
//!
//! Bytes are fed as they arrive from the network; complete events come out.
//! Chunk boundaries may fall anywhere, including inside a UTF-8 sequence or
//! between the `\r` and `\n` of a line ending.

use std::time::Duration;

/// One dispatched server event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    /// Event type; `message` when the server named none.
    pub event: String,
    pub data: String,
    /// Last event id seen on the stream at dispatch time.
    pub id: Option<String>,
}

impl ServerEvent {
    /// True for events a plain message listener receives.
    pub fn is_message(&self) -> bool {
        self.event == "message"
    }
}

#[derive(Debug, Default)]
pub struct EventStreamParser {
    line: Vec<u8>,
    /// Set after a `\r` so a following `\n` is not read as a second line end.
    skip_lf: bool,
    data: String,
    event: String,
    last_event_id: Option<String>,
    retry: Option<Duration>,
}

impl EventStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconnection delay requested by the server, if any.
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Last event id, replayed as `Last-Event-ID` on reconnect.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Drops any partial line and event, keeping id and retry.
    ///
    /// Called when a connection ends; a half-received event is never
    /// dispatched.
    pub fn reset(&mut self) {
        self.line.clear();
        self.skip_lf = false;
        self.data.clear();
        self.event.clear();
    }

    /// Feeds a chunk and returns the events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut events);
                }
                b'\n' => self.end_line(&mut events),
                _ => self.line.push(byte),
            }
        }
        events
    }

    fn end_line(&mut self, events: &mut Vec<ServerEvent>) {
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_str(), ""),
        };
        match field {
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "event" => self.event = value.to_string(),
            "id" if !value.contains('\0') => self.last_event_id = Some(value.to_string()),
            "retry" if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<ServerEvent> {
        let event = std::mem::take(&mut self.event);
        if self.data.is_empty() {
            return None;
        }
        let mut data = std::mem::take(&mut self.data);
        data.pop();
        Some(ServerEvent {
            event: if event.is_empty() {
                "message".to_string()
            } else {
                event
            },
            data,
            id: self.last_event_id.clone(),
        })
    }
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod tests;
