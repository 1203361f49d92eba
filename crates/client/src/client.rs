// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The run client: one handle over every mirrored resource.
//!
//! Nothing happens at construction. [`RunClient::connect`] starts an initial
//! fetch and a push channel per resource; [`RunClient::shutdown`] stops them.
//! Reads are served from the mirrors; writes and control actions go to the
//! server and come back as push updates.

use std::sync::{Arc, Mutex};

use bfpu_core::{
    matching_presets, ControlAction, ControlState, Example, MachineState, ResourceKind,
    Speed as SpeedValue,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::control::{ControlView, Controller};
use crate::error::{ClientError, ClientResult};
use crate::presets::{Catalog, EXAMPLES_PATH};
use crate::registry::SubscriptionHandle;
use crate::report::{ErrorReporter, Report};
use crate::resource::{Code, Input, Mirrors, Output, Resource, Speed, State};
use crate::transport::{Channel, ChannelEvent, HttpTransport, Method, Transport};

const CONTROL_PATH: &str = "/api/ctrl";

/// Cheap to clone; clones share the same mirrors and connections.
pub struct RunClient<T: Transport = HttpTransport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for RunClient<T> {
    fn clone(&self) -> Self {
        RunClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T> {
    transport: Arc<T>,
    config: ClientConfig,
    shared: Arc<Shared>,
    catalog: Catalog,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// State the background tasks write to.
struct Shared {
    mirrors: Mirrors,
    controller: Arc<Controller>,
    reporter: ErrorReporter,
}

impl Shared {
    fn apply_pushed<R: Resource>(&self, payload: &str) {
        match R::decode_pushed(payload) {
            Ok(value) => R::mirror(&self.mirrors).apply_pushed(value),
            Err(e) => self.reporter.report(Report::decode(R::KIND, &e)),
        }
    }

    fn apply_fetched<R: Resource>(&self, body: &str) {
        match R::decode_fetched(body) {
            Ok(value) => {
                R::mirror(&self.mirrors).apply_fetched(value);
            }
            Err(e) => self.reporter.report(Report::decode(R::KIND, &e)),
        }
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().unwrap_or_else(|e| e.into_inner()).drain(..) {
            task.abort();
        }
    }
}

impl RunClient<HttpTransport> {
    /// Client talking HTTP to `config.origin`.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> RunClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let controller = Arc::new(Controller::new());
        let shared = Arc::new(Shared {
            mirrors: Mirrors::new(),
            controller: Arc::clone(&controller),
            reporter: ErrorReporter::new(config.report_capacity),
        });
        shared
            .mirrors
            .get::<State>()
            .registry()
            .subscribe(move |state: &MachineState| controller.observe(state));

        RunClient {
            inner: Arc::new(Inner {
                transport: Arc::new(transport),
                config,
                shared,
                catalog: Catalog::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Starts the initial fetch and push channel of every resource.
    ///
    /// Fails with [`ClientError::NoRuntime`] outside a tokio runtime. Calling
    /// it again while connected does nothing.
    pub fn connect(&self) -> ClientResult<()> {
        tokio::runtime::Handle::try_current()
            .map_err(|e| ClientError::NoRuntime(e.to_string()))?;
        let mut tasks = self.lock_tasks();
        if !tasks.is_empty() {
            return Ok(());
        }
        info!("connecting to {}", self.inner.config.origin);
        tasks.extend(self.watch::<Code>());
        tasks.extend(self.watch::<Input>());
        tasks.extend(self.watch::<Output>());
        tasks.extend(self.watch::<State>());
        tasks.extend(self.watch::<Speed>());
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        !self.lock_tasks().is_empty()
    }

    /// Closes every push channel and abandons outstanding initial fetches.
    ///
    /// Mirrored values are kept.
    pub fn shutdown(&self) {
        let tasks: Vec<_> = self.lock_tasks().drain(..).collect();
        if tasks.is_empty() {
            return;
        }
        info!("disconnecting from {}", self.inner.config.origin);
        for task in tasks {
            task.abort();
        }
    }

    fn watch<R: Resource>(&self) -> [JoinHandle<()>; 2] {
        let channel = self.inner.transport.open_channel(&R::KIND.channel_path());
        debug!("{}: channel opened", R::KIND);
        let follow = tokio::spawn(follow_channel::<R>(Arc::clone(&self.inner.shared), channel));
        let fetch = tokio::spawn(fetch_initial::<T, R>(
            Arc::clone(&self.inner.transport),
            Arc::clone(&self.inner.shared),
        ));
        [fetch, follow]
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }

    // -- reads --

    /// Current value of `R`, or `None` while still loading.
    pub fn get<R: Resource>(&self) -> Option<R::Value> {
        self.inner.shared.mirrors.get::<R>().get()
    }

    /// Waits until `R` has a value.
    pub async fn wait<R: Resource>(&self) -> Option<R::Value> {
        self.inner.shared.mirrors.get::<R>().wait().await
    }

    pub fn program(&self) -> Option<String> {
        self.get::<Code>()
    }

    pub fn input(&self) -> Option<String> {
        self.get::<Input>()
    }

    pub fn output(&self) -> Option<String> {
        self.get::<Output>()
    }

    pub fn state(&self) -> Option<MachineState> {
        self.get::<State>()
    }

    pub fn speed(&self) -> Option<SpeedValue> {
        self.get::<Speed>()
    }

    // -- subscriptions --

    /// Calls `listener` with every value `R` takes from now on.
    pub fn subscribe<R: Resource>(
        &self,
        listener: impl Fn(&R::Value) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        self.inner
            .shared
            .mirrors
            .get::<R>()
            .registry()
            .subscribe(listener)
    }

    /// Returns whether a listener was removed. Unknown handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mirrors = &self.inner.shared.mirrors;
        match handle.resource() {
            ResourceKind::Code => mirrors.get::<Code>().registry().unsubscribe(handle),
            ResourceKind::Input => mirrors.get::<Input>().registry().unsubscribe(handle),
            ResourceKind::Output => mirrors.get::<Output>().registry().unsubscribe(handle),
            ResourceKind::State => mirrors.get::<State>().registry().unsubscribe(handle),
            ResourceKind::Speed => mirrors.get::<Speed>().registry().unsubscribe(handle),
        }
    }

    /// Every failed request, channel failure and discarded payload.
    ///
    /// Failures of calls made through this handle are reported here and
    /// also returned to the caller.
    pub fn errors(&self) -> broadcast::Receiver<Report> {
        self.inner.shared.reporter.subscribe()
    }

    // -- writes --

    /// Replaces the program. Accepted by the server only while idle or
    /// uncontrolled; the new text arrives back as a push.
    pub async fn set_program(&self, code: &str) -> ClientResult<()> {
        self.put(ResourceKind::Code, code.to_string()).await
    }

    /// Replaces the pending input.
    pub async fn set_input(&self, input: &str) -> ClientResult<()> {
        self.put(ResourceKind::Input, input.to_string()).await
    }

    pub async fn clear_input(&self) -> ClientResult<()> {
        self.set_input("").await
    }

    pub async fn set_speed(&self, speed: SpeedValue) -> ClientResult<()> {
        self.put(ResourceKind::Speed, speed.to_string()).await
    }

    async fn put(&self, resource: ResourceKind, body: String) -> ClientResult<()> {
        debug!("writing {}", resource);
        let result = self
            .inner
            .transport
            .request(Method::Put, &resource.fetch_path(), Some(body))
            .await;
        if let Err(e) = &result {
            self.inner.shared.reporter.report(Report::transport(resource, e));
        }
        result?;
        Ok(())
    }

    /// Sends a call outside the mirrored resources, reporting its failure.
    async fn call(&self, method: Method, path: &str, body: Option<String>) -> ClientResult<()> {
        let result = self.inner.transport.request(method, path, body).await;
        if let Err(e) = result {
            let e = ClientError::from(e);
            self.inner.shared.reporter.report(Report::request(method, path, &e));
            return Err(e);
        }
        Ok(())
    }

    // -- control --

    /// Controls, legality and pending flags; `None` until state is loaded.
    pub fn control_view(&self) -> Option<ControlView> {
        self.inner.shared.controller.view(self.state().as_ref())
    }

    /// Submits `action` if it is legal in the mirrored state.
    pub async fn control_action(&self, action: ControlAction) -> ClientResult<()> {
        self.submit(action, None).await
    }

    /// Steps `count` times, or once when `None`.
    pub async fn step(&self, count: Option<u32>) -> ClientResult<()> {
        let body = count.map(|n| n.to_string());
        self.submit(ControlAction::Step, body).await
    }

    async fn submit(&self, action: ControlAction, body: Option<String>) -> ClientResult<()> {
        let controller = &self.inner.shared.controller;
        controller.check(self.state().as_ref(), action)?;

        let _pending = controller.begin(action);
        let path = format!("{}/{}", CONTROL_PATH, action.endpoint());
        self.call(Method::Post, &path, body).await
    }

    /// Takes (`true`) or releases (`false`) control of the machine.
    pub async fn set_control(&self, control: bool) -> ClientResult<()> {
        let _pending = self.inner.shared.controller.begin_toggle();
        let method = if control { Method::Put } else { Method::Delete };
        self.call(method, CONTROL_PATH, None).await
    }

    /// Takes control when uncontrolled, releases it otherwise.
    pub async fn toggle_control(&self) -> ClientResult<()> {
        let state = self
            .state()
            .ok_or(ClientError::NotInitialized(ResourceKind::State))?;
        self.set_control(state.control_state == ControlState::Uncontrolled)
            .await
    }

    // -- presets --

    /// The preset catalog, fetched on first use.
    pub async fn examples(&self) -> ClientResult<Vec<Example>> {
        match self.inner.catalog.get(&*self.inner.transport).await {
            Ok(examples) => Ok(examples.to_vec()),
            Err(e) => {
                let report = Report::request(Method::Get, EXAMPLES_PATH, &e);
                self.inner.shared.reporter.report(report);
                Err(e)
            }
        }
    }

    /// Indices of loaded presets whose code equals the mirrored program.
    pub fn matching_examples(&self) -> Vec<usize> {
        match (self.inner.catalog.cached(), self.program()) {
            (Some(catalog), Some(program)) => matching_presets(catalog, &program),
            _ => Vec::new(),
        }
    }
}

async fn fetch_initial<T: Transport, R: Resource>(transport: Arc<T>, shared: Arc<Shared>) {
    let path = R::KIND.fetch_path();
    match transport.request(Method::Get, &path, None).await {
        Ok(response) => shared.apply_fetched::<R>(&response.body),
        Err(e) => shared.reporter.report(Report::transport(R::KIND, &e)),
    }
}

async fn follow_channel<R: Resource>(shared: Arc<Shared>, mut channel: Channel) {
    while let Some(event) = channel.recv().await {
        match event {
            ChannelEvent::Message(payload) => shared.apply_pushed::<R>(&payload),
            ChannelEvent::Error(e) => shared.reporter.report(Report::transport(R::KIND, &e)),
        }
    }
    debug!("{}: channel closed", R::KIND);
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
