//! `Events` — action and filter entry points over two registries.

use std::sync::Arc;

use eventy_core::config::EventyConfig;
use eventy_core::config::hooks::HookConfig;
use serde_json::Value;

use crate::callback::Callback;
use crate::dispatcher::Dispatcher;
use crate::error::HookResult;
use crate::functions::FunctionTable;
use crate::registry::HookRegistry;

/// Owns an action registry and a filter registry sharing one function table.
///
/// The `add_*`/`remove_*` forms without `_with` use the configured default
/// priority and argument count.
#[derive(Debug, Clone)]
pub struct Events {
    actions: Dispatcher,
    filters: Dispatcher,
}

impl Events {
    /// Creates an instance with the stock defaults.
    pub fn new() -> Self {
        Self::with_config(HookConfig::default())
    }

    /// Creates an instance using the hook section of `config`.
    pub fn from_config(config: &EventyConfig) -> Self {
        Self::with_config(config.hooks.clone())
    }

    /// Creates an instance with explicit registration defaults.
    pub fn with_config(defaults: HookConfig) -> Self {
        let functions = Arc::new(FunctionTable::new());
        Self {
            actions: Dispatcher::with_functions(
                Arc::new(HookRegistry::with_config(defaults.clone())),
                functions.clone(),
            ),
            filters: Dispatcher::with_functions(
                Arc::new(HookRegistry::with_config(defaults)),
                functions,
            ),
        }
    }

    /// Defines a function that named callbacks can refer to.
    pub fn define_function<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn(Vec<Value>) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.filters.functions().define(name, f);
    }

    // ── Actions ──

    /// Registers an action listener with default priority and arguments.
    pub fn add_action(&self, hook: &str, callback: impl Into<Callback>) {
        self.actions.registry().add_default(hook, callback.into());
    }

    /// Registers an action listener.
    pub fn add_action_with(
        &self,
        hook: &str,
        callback: impl Into<Callback>,
        priority: i32,
        arguments: usize,
    ) {
        self.actions
            .registry()
            .add(hook, callback.into(), priority, arguments);
    }

    /// Removes an action listener registered at the default priority.
    pub fn remove_action(&self, hook: &str, callback: impl Into<Callback>) {
        self.actions
            .registry()
            .remove_default(hook, &callback.into());
    }

    /// Removes an action listener registered at `priority`.
    pub fn remove_action_with(&self, hook: &str, callback: impl Into<Callback>, priority: i32) {
        self.actions
            .registry()
            .remove(hook, &callback.into(), priority);
    }

    /// Clears one action hook, or all of them.
    pub fn remove_all_actions(&self, hook: Option<&str>) {
        self.actions.registry().remove_all(hook);
    }

    /// Fires an action.
    pub fn action(&self, hook: &str, args: &[Value]) -> HookResult<()> {
        self.actions.fire(hook, args)
    }

    /// Returns the action dispatcher.
    pub fn actions(&self) -> &Dispatcher {
        &self.actions
    }

    // ── Filters ──

    /// Registers a filter listener with default priority and arguments.
    pub fn add_filter(&self, hook: &str, callback: impl Into<Callback>) {
        self.filters.registry().add_default(hook, callback.into());
    }

    /// Registers a filter listener.
    pub fn add_filter_with(
        &self,
        hook: &str,
        callback: impl Into<Callback>,
        priority: i32,
        arguments: usize,
    ) {
        self.filters
            .registry()
            .add(hook, callback.into(), priority, arguments);
    }

    /// Removes a filter listener registered at the default priority.
    pub fn remove_filter(&self, hook: &str, callback: impl Into<Callback>) {
        self.filters
            .registry()
            .remove_default(hook, &callback.into());
    }

    /// Removes a filter listener registered at `priority`.
    pub fn remove_filter_with(&self, hook: &str, callback: impl Into<Callback>, priority: i32) {
        self.filters
            .registry()
            .remove(hook, &callback.into(), priority);
    }

    /// Clears one filter hook, or all of them.
    pub fn remove_all_filters(&self, hook: Option<&str>) {
        self.filters.registry().remove_all(hook);
    }

    /// Runs `value` through a filter.
    pub fn filter(&self, hook: &str, value: Value, extra: &[Value]) -> HookResult<Value> {
        self.filters.run(hook, value, extra)
    }

    /// Returns the filter dispatcher.
    pub fn filters(&self) -> &Dispatcher {
        &self.filters
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}
