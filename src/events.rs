//! Change notifications for document mutations
//!
//! Listeners run synchronously after the mutation has been persisted, so a
//! callback that re-reads the backing file sees the new content.

use crate::sync::RwLockExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Type alias for a change callback
///
/// Receives (`path`, `old_value`, `new_value`). `old_value` is `None` when the
/// key did not exist before a `set`; `new_value` is `None` after a `delete`.
pub type ChangeCallback = Arc<dyn Fn(&[String], Option<&Value>, Option<&Value>) + Send + Sync>;

/// Manages listeners for document changes
pub struct EventManager {
    /// Global listeners (called for all changes)
    global_listeners: RwLock<Vec<ChangeCallback>>,

    /// Listeners keyed by the first path segment (the namespace)
    namespace_listeners: RwLock<HashMap<String, Vec<ChangeCallback>>>,
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            global_listeners: RwLock::new(Vec::new()),
            namespace_listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Register a listener called for every successful `set` and `delete`
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&[String], Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.global_listeners.write_recovered() {
            guard.push(Arc::new(callback));
        }
    }

    /// Register a listener for changes under one namespace
    ///
    /// Fires for any path whose first segment equals `namespace`, including a
    /// `set` that replaces the whole namespace mapping.
    pub fn watch<F>(&self, namespace: &str, callback: F)
    where
        F: Fn(&[String], Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.namespace_listeners.write_recovered() {
            guard
                .entry(namespace.to_string())
                .or_default()
                .push(Arc::new(callback));
        }
    }

    /// Notify all matching listeners about a change
    pub fn notify(&self, path: &[String], old_value: Option<&Value>, new_value: Option<&Value>) {
        // Snapshot first so a callback may register further listeners
        let mut callbacks: Vec<ChangeCallback> = Vec::new();

        if let Ok(guard) = self.global_listeners.read_recovered() {
            callbacks.extend(guard.iter().cloned());
        }

        if let Some(namespace) = path.first() {
            if let Ok(guard) = self.namespace_listeners.read_recovered() {
                if let Some(listeners) = guard.get(namespace) {
                    callbacks.extend(listeners.iter().cloned());
                }
            }
        }

        for callback in callbacks {
            callback(path, old_value, new_value);
        }
    }

    /// Remove all listeners for a namespace
    pub fn unwatch(&self, namespace: &str) {
        if let Ok(mut guard) = self.namespace_listeners.write_recovered() {
            guard.remove(namespace);
        }
    }

    /// Clear all listeners
    pub fn clear(&self) {
        if let Ok(mut guard) = self.global_listeners.write_recovered() {
            guard.clear();
        }
        if let Ok(mut guard) = self.namespace_listeners.write_recovered() {
            guard.clear();
        }
    }

    /// Whether any listener is registered
    pub fn is_empty(&self) -> bool {
        let global_empty = self
            .global_listeners
            .read_recovered()
            .map(|g| g.is_empty())
            .unwrap_or(true);
        let scoped_empty = self
            .namespace_listeners
            .read_recovered()
            .map(|g| g.values().all(Vec::is_empty))
            .unwrap_or(true);
        global_empty && scoped_empty
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
