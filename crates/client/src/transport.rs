// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for request/response calls and push channels.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP and event-stream connections for production
//! - Scripted transports for unit testing

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{TransportError, TransportResult};
use crate::sse::EventStreamParser;

/// Boxed future returned by transport methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// What a push channel emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A message payload, in server-send order.
    Message(String),
    /// The connection failed or dropped; the channel keeps reconnecting.
    Error(TransportError),
}

/// A persistent server-push channel.
///
/// Closing (or dropping) the channel stops the task feeding it, which closes
/// the underlying connection.
pub struct Channel {
    events: mpsc::UnboundedReceiver<ChannelEvent>,
    feeder: Option<JoinHandle<()>>,
}

impl Channel {
    /// Wraps a receiver and the task that feeds it.
    pub fn new(
        events: mpsc::UnboundedReceiver<ChannelEvent>,
        feeder: Option<JoinHandle<()>>,
    ) -> Self {
        Channel { events, feeder }
    }

    /// Next event, or `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        self.events.recv().await
    }

    pub fn close(&mut self) {
        if let Some(feeder) = self.feeder.take() {
            feeder.abort();
        }
        self.events.close();
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Transport trait for the remote machine's API.
///
/// All paths are relative to a single origin.
pub trait Transport: Send + Sync + 'static {
    /// Performs one call. Non-2xx statuses fail with [`TransportError::Status`].
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> BoxFuture<'_, TransportResult<Response>>;

    /// Opens a push channel that reconnects on its own until closed.
    fn open_channel(&self, path: &str) -> Channel;
}

/// Backoff applied between push channel reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl ReconnectPolicy {
    /// Delay after `delay`, doubled and capped.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        std::cmp::min(delay * 2, self.max_delay)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// HTTP transport implementation using reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    origin: String,
    policy: ReconnectPolicy,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> TransportResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(HttpTransport {
            http,
            origin: config.origin.trim_end_matches('/').to_string(),
            policy: config.reconnect_policy(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> BoxFuture<'_, TransportResult<Response>> {
        let url = self.url(path);
        Box::pin(async move {
            let mut request = match method {
                Method::Get => self.http.get(&url),
                Method::Put => self.http.put(&url),
                Method::Post => self.http.post(&url),
                Method::Delete => self.http.delete(&url),
            };
            if let Some(body) = body {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
                    .body(body);
            }

            debug!("{} {}", method, url);
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                    body: (!text.is_empty()).then_some(text),
                });
            }
            Ok(Response {
                status: status.as_u16(),
                body: text,
            })
        })
    }

    fn open_channel(&self, path: &str) -> Channel {
        let (tx, rx) = mpsc::unbounded_channel();
        let feeder = tokio::spawn(follow_event_stream(
            self.http.clone(),
            self.url(path),
            self.policy,
            tx,
        ));
        Channel::new(rx, Some(feeder))
    }
}

/// Keeps one event stream connected and forwards its messages.
///
/// Returns once the receiving side of the channel is gone.
async fn follow_event_stream(
    http: reqwest::Client,
    url: String,
    policy: ReconnectPolicy,
    tx: mpsc::UnboundedSender<ChannelEvent>,
) {
    use futures_util::StreamExt;

    let mut parser = EventStreamParser::new();
    let mut delay = policy.initial_delay;

    loop {
        let mut request = http
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream");
        if let Some(id) = parser.last_event_id() {
            request = request.header("Last-Event-ID", id);
        }

        let failure = match request.send().await {
            Ok(response) if response.status().is_success() => {
                info!("channel open: {}", url);
                let mut body = Box::pin(response.bytes_stream());
                let failure = loop {
                    match body.next().await {
                        Some(Ok(chunk)) => {
                            for event in parser.feed(&chunk) {
                                if !event.is_message() {
                                    continue;
                                }
                                if tx.send(ChannelEvent::Message(event.data)).is_err() {
                                    return;
                                }
                            }
                        }
                        Some(Err(e)) => break e.to_string(),
                        None => break "stream ended".to_string(),
                    }
                };
                parser.reset();
                // a stream that got through resets the backoff
                delay = parser.retry().unwrap_or(policy.initial_delay);
                failure
            }
            Ok(response) => format!("unexpected status {}", response.status()),
            Err(e) => e.to_string(),
        };

        debug!("channel {} dropped: {}", url, failure);
        let error = TransportError::Channel(format!("{url}: {failure}"));
        if tx.send(ChannelEvent::Error(error)).is_err() {
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tx.closed() => return,
        }
        delay = policy.next_delay(delay);
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
pub(crate) mod tests;
