//! Invocable listener representations.
//!
//! A [`Callback`] is one of:
//!
//! - a **named** function, resolved through a [`FunctionTable`] when the hook
//!   runs and compared by name;
//! - a shared **closure**, compared by identity of its allocation;
//! - a **method** on a [`HookTarget`] object, compared by target identity and
//!   method name.
//!
//! Registration never validates a callback. Problems surface as
//! [`HookError::Invocation`] the first time a dispatch tries to call it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{HookError, HookResult};
use crate::functions::FunctionTable;

/// Function signature shared by closures and named functions.
///
/// Receives the positional arguments selected by the dispatcher.
pub type CallbackFn = dyn Fn(Vec<Value>) -> HookResult<Value> + Send + Sync;

/// An object whose methods can be registered as listeners.
pub trait HookTarget: Send + Sync {
    /// Calls `method` with `args`.
    ///
    /// Returns `None` if the object has no method by that name.
    fn call_method(&self, method: &str, args: Vec<Value>) -> Option<HookResult<Value>>;

    /// Name used in error messages.
    fn type_name(&self) -> &str {
        "object"
    }
}

/// A listener callback.
#[derive(Clone)]
pub enum Callback {
    /// Reference to a function defined in a [`FunctionTable`].
    Named(String),
    /// Shared closure.
    Closure {
        /// The closure itself.
        func: Arc<CallbackFn>,
        /// Minimum number of positional arguments the closure needs.
        params: usize,
    },
    /// Method bound to an object.
    Method {
        /// Receiver.
        target: Arc<dyn HookTarget>,
        /// Method name on the receiver.
        method: String,
    },
}

impl Callback {
    /// References a function by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a closure that takes any number of arguments.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> HookResult<Value> + Send + Sync + 'static,
    {
        Self::Closure {
            func: Arc::new(f),
            params: 0,
        }
    }

    /// Wraps a one-argument closure.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::try_unary(move |value| Ok(f(value)))
    }

    /// Wraps a fallible one-argument closure.
    pub fn try_unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> HookResult<Value> + Send + Sync + 'static,
    {
        Self::Closure {
            func: Arc::new(move |args: Vec<Value>| {
                let mut args = args.into_iter();
                f(args.next().unwrap_or(Value::Null))
            }),
            params: 1,
        }
    }

    /// Wraps a two-argument closure.
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(Value, Value) -> Value + Send + Sync + 'static,
    {
        Self::Closure {
            func: Arc::new(move |args: Vec<Value>| {
                let mut args = args.into_iter();
                let first = args.next().unwrap_or(Value::Null);
                let second = args.next().unwrap_or(Value::Null);
                Ok(f(first, second))
            }),
            params: 2,
        }
    }

    /// Binds `method` on `target`.
    pub fn method(target: Arc<dyn HookTarget>, method: impl Into<String>) -> Self {
        Self::Method {
            target,
            method: method.into(),
        }
    }

    /// Human-readable description for logs and errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Named(name) => format!("function '{name}'"),
            Self::Closure { params, .. } => format!("closure/{params}"),
            Self::Method { target, method } => {
                format!("method '{}::{}'", target.type_name(), method)
            }
        }
    }

    /// Calls the callback with `args` on behalf of `hook`.
    ///
    /// Errors returned by the listener itself are passed through as-is.
    pub fn invoke(
        &self,
        hook: &str,
        args: Vec<Value>,
        functions: &FunctionTable,
    ) -> HookResult<Value> {
        match self {
            Self::Named(name) => match functions.resolve(name) {
                Some(func) => func(args),
                None => Err(HookError::invocation(
                    hook,
                    self.describe(),
                    "function is not defined",
                )),
            },
            Self::Closure { func, params } => {
                if args.len() < *params {
                    return Err(HookError::invocation(
                        hook,
                        self.describe(),
                        format!("expects {} arguments, {} given", params, args.len()),
                    ));
                }
                func(args)
            }
            Self::Method { target, method } => target
                .call_method(method, args)
                .unwrap_or_else(|| {
                    Err(HookError::invocation(
                        hook,
                        self.describe(),
                        "method is not defined",
                    ))
                }),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Closure { func: a, .. }, Self::Closure { func: b, .. }) => Arc::ptr_eq(a, b),
            (
                Self::Method {
                    target: a,
                    method: m,
                },
                Self::Method {
                    target: b,
                    method: n,
                },
            ) => Arc::ptr_eq(a, b) && m == n,
            _ => false,
        }
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Closure { func, params } => f
                .debug_struct("Closure")
                .field("func", &Arc::as_ptr(func).cast::<()>())
                .field("params", params)
                .finish(),
            Self::Method { target, method } => f
                .debug_struct("Method")
                .field("target", &target.type_name())
                .field("method", method)
                .finish(),
        }
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Callback {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
