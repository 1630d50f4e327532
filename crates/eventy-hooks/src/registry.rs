//! Hook registry — listeners registered by hook name with priority ordering.
//!
//! Each hook's listeners are kept sorted by `(priority, sequence)` after
//! every mutation, so readers never see an unsorted list and dispatch never
//! sorts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use eventy_core::config::hooks::HookConfig;
use tracing::debug;

use crate::callback::Callback;

/// A registered listener.
#[derive(Debug, Clone)]
pub struct ListenerEntry {
    callback: Callback,
    priority: i32,
    arguments: usize,
    sequence: u64,
}

impl ListenerEntry {
    /// The registered callback.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Priority (lower = earlier execution).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Number of positional arguments forwarded to the callback.
    pub fn arguments(&self) -> usize {
        self.arguments
    }

    /// Registration order within the owning registry.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Registry of listeners organized by hook name.
///
/// Mutations take `&self`; the table sits behind a lock so a registry shared
/// through an `Arc` can be changed by listeners while a dispatch is running.
#[derive(Debug)]
pub struct HookRegistry {
    /// Hook name → listeners sorted by `(priority, sequence)`.
    hooks: RwLock<HashMap<String, Vec<ListenerEntry>>>,
    /// Next insertion sequence number. Never reused.
    next_sequence: AtomicU64,
    /// Defaults for the `*_default` operations.
    defaults: HookConfig,
}

impl HookRegistry {
    /// Creates an empty registry with the stock defaults.
    pub fn new() -> Self {
        Self::with_config(HookConfig::default())
    }

    /// Creates an empty registry with the given defaults.
    pub fn with_config(defaults: HookConfig) -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
            next_sequence: AtomicU64::new(0),
            defaults,
        }
    }

    /// Returns the defaults in use.
    pub fn defaults(&self) -> &HookConfig {
        &self.defaults
    }

    /// Registers `callback` on `hook`.
    ///
    /// Duplicates are allowed: registering the same callback twice creates
    /// two independent entries.
    pub fn add(&self, hook: &str, callback: Callback, priority: i32, arguments: usize) {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        debug!(
            hook = %hook,
            callback = %callback.describe(),
            priority,
            arguments,
            "Listener registered"
        );

        let mut hooks = self.write();
        let entries = hooks.entry(hook.to_string()).or_default();
        entries.push(ListenerEntry {
            callback,
            priority,
            arguments,
            sequence,
        });
        entries.sort_by_key(|e| (e.priority, e.sequence));
    }

    /// Registers `callback` on `hook` with the default priority and argument count.
    pub fn add_default(&self, hook: &str, callback: Callback) {
        self.add(
            hook,
            callback,
            self.defaults.default_priority,
            self.defaults.default_arguments,
        );
    }

    /// Removes every entry on `hook` whose callback equals `callback` and
    /// whose priority equals `priority`. Removing nothing is not an error.
    pub fn remove(&self, hook: &str, callback: &Callback, priority: i32) {
        let mut hooks = self.write();
        let Some(entries) = hooks.get_mut(hook) else {
            return;
        };

        let before = entries.len();
        entries.retain(|e| !(e.priority == priority && &e.callback == callback));

        debug!(
            hook = %hook,
            callback = %callback.describe(),
            priority,
            removed = before - entries.len(),
            "Listener removed"
        );
    }

    /// Removes `callback` from `hook` at the default priority.
    pub fn remove_default(&self, hook: &str, callback: &Callback) {
        self.remove(hook, callback, self.defaults.default_priority);
    }

    /// Clears one hook's listeners, or every hook when `hook` is `None`.
    ///
    /// A cleared hook stays known to [`hooks`](Self::hooks) with no listeners.
    pub fn remove_all(&self, hook: Option<&str>) {
        let mut hooks = self.write();
        match hook {
            Some(name) => {
                hooks.entry(name.to_string()).or_default().clear();
                debug!(hook = %name, "All listeners removed from hook");
            }
            None => {
                hooks.clear();
                debug!("All listeners removed");
            }
        }
    }

    /// Returns a snapshot of the listeners on `hook` in execution order.
    ///
    /// Unknown hooks yield an empty list.
    pub fn listeners(&self, hook: &str) -> Vec<ListenerEntry> {
        self.read().get(hook).cloned().unwrap_or_default()
    }

    /// Returns the number of listeners on `hook`.
    pub fn count(&self, hook: &str) -> usize {
        self.read().get(hook).map(Vec::len).unwrap_or(0)
    }

    /// Returns whether any listeners are registered on `hook`.
    pub fn has_listeners(&self, hook: &str) -> bool {
        self.count(hook) > 0
    }

    /// Returns all known hook names, sorted.
    pub fn hooks(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    // Each mutation completes under a single guard, so a poisoned lock
    // still holds a consistent table.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<ListenerEntry>>> {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<ListenerEntry>>> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
