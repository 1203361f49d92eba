// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bfpu-client: Synchronization and control layer for a remote tape machine
//!
//! Keeps a local mirror of the machine's program, input, output, state and
//! speed, fed by an initial fetch plus a server-push channel per resource,
//! and gates control actions on the mirrored control state.

pub mod client;
pub mod config;
pub mod control;
pub mod error;
pub mod mirror;
mod presets;
pub mod registry;
pub mod report;
pub mod resource;
pub mod sse;
pub mod transport;

pub use client::RunClient;
pub use config::ClientConfig;
pub use control::ControlView;
pub use error::{ClientError, ClientResult, TransportError, TransportResult};
pub use mirror::Mirror;
pub use registry::SubscriptionHandle;
pub use report::{ErrorReporter, Report, ReportKind};
pub use resource::{Code, Input, Output, Resource, Speed, State};
pub use transport::{Channel, ChannelEvent, HttpTransport, Method, Response, Transport};
