// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-resource listener sets.
//!
//! Each resource has its own registry typed by its value, so a listener can
//! only ever receive the payload it subscribed for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bfpu_core::ResourceKind;

/// A change listener.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies one subscription; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    resource: ResourceKind,
    id: u64,
}

impl SubscriptionHandle {
    pub fn resource(&self) -> ResourceKind {
        self.resource
    }
}

pub struct Registry<T> {
    resource: ResourceKind,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
}

impl<T> Registry<T> {
    pub fn new(resource: ResourceKind) -> Self {
        Registry {
            resource,
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        SubscriptionHandle {
            resource: self.resource,
            id,
        }
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        if handle.resource != self.resource {
            return false;
        }
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != handle.id);
        listeners.len() != before
    }

    /// Calls every listener with `value`.
    ///
    /// Listeners run outside the lock, so they may subscribe or unsubscribe.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
