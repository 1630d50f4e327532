//! Named function table backing [`Callback::Named`](crate::Callback::Named).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::callback::CallbackFn;
use crate::error::HookResult;

/// Thread-safe map from function name to implementation.
///
/// Names are resolved at dispatch time, so a listener may be registered
/// before its function is defined.
#[derive(Default)]
pub struct FunctionTable {
    functions: RwLock<HashMap<String, Arc<CallbackFn>>>,
}

impl FunctionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name`, replacing any previous definition.
    pub fn define<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn(Vec<Value>) -> HookResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(function = %name, "Function defined");
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(f));
    }

    /// Removes `name`. Returns `true` if it was defined.
    pub fn undefine(&self, name: &str) -> bool {
        self.functions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    /// Looks up `name`.
    pub fn resolve(&self, name: &str) -> Option<Arc<CallbackFn>> {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.functions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionTable")
            .field("functions", &names)
            .finish()
    }
}
