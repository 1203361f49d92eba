// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locally cached copy of one remote resource.
//!
//! Two producers feed a mirror: one initial fetch and the push channel. A
//! fetched value is only stored while the mirror is still empty, because a
//! push that arrived while the fetch was in flight is newer. Pushed values are
//! always stored. Each stored value is handed to the registry's listeners.

use std::sync::Mutex;

use bfpu_core::ResourceKind;
use tokio::sync::watch;
use tracing::debug;

use crate::registry::Registry;

pub struct Mirror<T> {
    resource: ResourceKind,
    value: Mutex<Option<T>>,
    /// Serializes store-then-notify so listeners see values in store order.
    sequence: Mutex<()>,
    /// Bumped on every stored value.
    updates: watch::Sender<u64>,
    registry: Registry<T>,
}

impl<T: Clone + Send + Sync + 'static> Mirror<T> {
    pub fn new(resource: ResourceKind) -> Self {
        let (updates, _) = watch::channel(0);
        Mirror {
            resource,
            value: Mutex::new(None),
            sequence: Mutex::new(()),
            updates,
            registry: Registry::new(resource),
        }
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    /// Last stored value, or `None` while still loading.
    pub fn get(&self) -> Option<T> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    /// Receiver whose value counts stored updates.
    pub fn updates(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Waits until the mirror holds a value and returns it.
    pub async fn wait(&self) -> Option<T> {
        let mut updates = self.updates.subscribe();
        loop {
            if let Some(value) = self.get() {
                return Some(value);
            }
            if updates.changed().await.is_err() {
                return None;
            }
        }
    }

    /// Stores the initial fetch result unless a value is already held.
    ///
    /// Returns whether the value was stored.
    pub(crate) fn apply_fetched(&self, value: T) -> bool {
        self.store(value, true)
    }

    /// Stores a pushed value unconditionally.
    pub(crate) fn apply_pushed(&self, value: T) {
        self.store(value, false);
    }

    fn store(&self, value: T, only_if_empty: bool) -> bool {
        let _order = self.sequence.lock().unwrap_or_else(|e| e.into_inner());
        {
            let mut slot = self.value.lock().unwrap_or_else(|e| e.into_inner());
            if only_if_empty && slot.is_some() {
                debug!("{}: fetched value discarded, push already applied", self.resource);
                return false;
            }
            *slot = Some(value.clone());
        }
        debug!(
            "{}: {} value applied",
            self.resource,
            if only_if_empty { "fetched" } else { "pushed" }
        );
        self.updates.send_modify(|count| *count += 1);
        self.registry.notify(&value);
        true
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
