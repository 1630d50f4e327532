//! Hook dispatcher — runs a hook's listeners in priority order.
//!
//! Two styles share the same ordering rules:
//!
//! - [`Dispatcher::run`] (filters) threads a value through every listener;
//!   each listener's return value becomes the next listener's input.
//! - [`Dispatcher::fire`] (actions) calls every listener for its side effect
//!   and discards return values.
//!
//! Both take a snapshot of the listener list before the first call and
//! release the registry lock, so listeners may add or remove listeners
//! (including on the hook being dispatched) without affecting the current
//! run. The first failing listener aborts the run and its error is returned
//! unchanged.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::HookResult;
use crate::functions::FunctionTable;
use crate::registry::HookRegistry;

/// Dispatches hooks to the listeners of one registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Listener registry.
    registry: Arc<HookRegistry>,
    /// Definitions for named callbacks.
    functions: Arc<FunctionTable>,
}

impl Dispatcher {
    /// Creates a dispatcher with its own empty function table.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self::with_functions(registry, Arc::new(FunctionTable::new()))
    }

    /// Creates a dispatcher resolving named callbacks through `functions`.
    pub fn with_functions(registry: Arc<HookRegistry>, functions: Arc<FunctionTable>) -> Self {
        Self {
            registry,
            functions,
        }
    }

    /// Folds `value` through every listener on `hook` and returns the result.
    ///
    /// Each listener receives the first `arguments` items of
    /// `[running value, extra[0], extra[1], ..]`. Extra arguments a listener
    /// did not ask for are dropped for that listener only. With no listeners
    /// the input comes back unchanged.
    pub fn run(&self, hook: &str, mut value: Value, extra: &[Value]) -> HookResult<Value> {
        let listeners = self.registry.listeners(hook);
        if listeners.is_empty() {
            return Ok(value);
        }

        debug!(
            hook = %hook,
            listener_count = listeners.len(),
            "Running filter"
        );

        for listener in &listeners {
            let args: Vec<Value> = std::iter::once(value)
                .chain(extra.iter().cloned())
                .take(listener.arguments())
                .collect();

            trace!(
                hook = %hook,
                callback = %listener.callback().describe(),
                priority = listener.priority(),
                "Invoking filter listener"
            );
            value = listener.callback().invoke(hook, args, &self.functions)?;
        }

        Ok(value)
    }

    /// Calls every listener on `hook` with the first `arguments` items of
    /// `args`. Return values are discarded.
    pub fn fire(&self, hook: &str, args: &[Value]) -> HookResult<()> {
        let listeners = self.registry.listeners(hook);
        if listeners.is_empty() {
            return Ok(());
        }

        debug!(
            hook = %hook,
            listener_count = listeners.len(),
            "Firing action"
        );

        for listener in &listeners {
            let args: Vec<Value> = args.iter().take(listener.arguments()).cloned().collect();

            trace!(
                hook = %hook,
                callback = %listener.callback().describe(),
                priority = listener.priority(),
                "Invoking action listener"
            );
            listener.callback().invoke(hook, args, &self.functions)?;
        }

        Ok(())
    }

    /// Returns the registry this dispatcher reads from.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Returns the function table used for named callbacks.
    pub fn functions(&self) -> &Arc<FunctionTable> {
        &self.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::Callback;
    use crate::error::HookError;
    use serde_json::json;
    use std::sync::Mutex;

    fn append(suffix: &'static str) -> Callback {
        Callback::unary(move |v| json!(format!("{}{}", v.as_str().unwrap_or_default(), suffix)))
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(HookRegistry::new()))
    }

    #[test]
    fn test_empty_hook_is_identity() {
        let d = dispatcher();
        let value = json!({"nested": [1, 2, 3]});
        assert_eq!(d.run("unknown", value.clone(), &[]).unwrap(), value);
        assert!(d.fire("unknown", &[json!(1)]).is_ok());
    }

    #[test]
    fn test_cleared_hook_is_identity() {
        let d = dispatcher();
        d.registry().add_default("h", append("-A"));
        d.registry().remove_all(Some("h"));
        assert_eq!(d.run("h", json!("x"), &[]).unwrap(), json!("x"));
    }

    #[test]
    fn test_chain_in_priority_order() {
        let d = dispatcher();
        d.registry().add("h", append("-LOW"), 200, 1);
        d.registry().add("h", append("-HIGH"), 10, 1);
        d.registry().add("h", append("-MID"), 20, 1);

        let out = d.run("h", json!("hello"), &[]).unwrap();
        assert_eq!(out, json!("hello-HIGH-MID-LOW"));
    }

    #[test]
    fn test_argument_count_per_listener() {
        let d = dispatcher();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for arguments in [0, 1, 2, 5] {
            let seen = seen.clone();
            d.registry().add(
                "h",
                Callback::from_fn(move |args| {
                    seen.lock().unwrap().push(args.len());
                    Ok(args.into_iter().next().unwrap_or(json!("reset")))
                }),
                20,
                arguments,
            );
        }

        let out = d.run("h", json!("v"), &[json!(1), json!(2)]).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3]);
        // The zero-argument listener ran first and replaced the value.
        assert_eq!(out, json!("reset"));
    }

    #[test]
    fn test_huge_argument_count_takes_what_is_supplied() {
        let d = dispatcher();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        d.registry().add(
            "h",
            Callback::from_fn(move |args| {
                log.lock().unwrap().push(args.clone());
                Ok(args.into_iter().next().unwrap_or(Value::Null))
            }),
            20,
            usize::MAX,
        );

        let out = d.run("h", json!("v"), &[json!(1)]).unwrap();
        assert_eq!(out, json!("v"));
        assert_eq!(*seen.lock().unwrap(), vec![vec![json!("v"), json!(1)]]);
        assert!(d.fire("h", &[json!("a")]).is_ok());
    }

    #[test]
    fn test_null_return_is_kept() {
        let d = dispatcher();
        d.registry().add_default("h", Callback::unary(|_| Value::Null));
        assert_eq!(d.run("h", json!("x"), &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_failure_stops_chain() {
        let d = dispatcher();
        let ran = Arc::new(Mutex::new(false));
        let flag = ran.clone();

        d.registry()
            .add("h", Callback::try_unary(|_| Err(HookError::failed("nope"))), 10, 1);
        d.registry().add(
            "h",
            Callback::unary(move |v| {
                *flag.lock().unwrap() = true;
                v
            }),
            20,
            1,
        );

        let err = d.run("h", json!("x"), &[]).unwrap_err();
        assert!(matches!(err, HookError::Failed { ref reason } if reason == "nope"));
        assert!(!*ran.lock().unwrap());
    }

    #[test]
    fn test_undefined_named_callback_fails_on_run() {
        let d = dispatcher();
        d.registry().add("h", Callback::named("my_awesome_function"), 30, 1);
        let err = d.run("h", json!("x"), &[]).unwrap_err();
        assert!(err.is_invocation());
    }

    #[test]
    fn test_named_callback_resolves() {
        let d = dispatcher();
        d.functions().define("shout", |args| {
            Ok(json!(args[0].as_str().unwrap_or_default().to_uppercase()))
        });
        d.registry().add_default("h", Callback::named("shout"));
        assert_eq!(d.run("h", json!("hey"), &[]).unwrap(), json!("HEY"));
    }

    #[test]
    fn test_mutation_during_run_uses_snapshot() {
        let registry = Arc::new(HookRegistry::new());
        let d = Dispatcher::new(registry.clone());

        let inner = registry.clone();
        d.registry().add(
            "h",
            Callback::unary(move |v| {
                inner.remove_all(Some("h"));
                inner.add("h", Callback::unary(|_| json!("late")), 0, 1);
                json!(format!("{}-A", v.as_str().unwrap_or_default()))
            }),
            10,
            1,
        );
        d.registry().add("h", append("-B"), 20, 1);

        assert_eq!(d.run("h", json!("x"), &[]).unwrap(), json!("x-A-B"));
        // The next run sees the listener added mid-run.
        assert_eq!(registry.count("h"), 1);
        assert_eq!(d.run("h", json!("x"), &[]).unwrap(), json!("late"));
    }

    #[test]
    fn test_fire_passes_leading_args() {
        let d = dispatcher();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for arguments in [1, 3] {
            let calls = calls.clone();
            d.registry().add(
                "saved",
                Callback::from_fn(move |args| {
                    calls.lock().unwrap().push(args);
                    Ok(Value::Null)
                }),
                20,
                arguments,
            );
        }

        d.fire("saved", &[json!("post"), json!(7)]).unwrap();
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], vec![json!("post")]);
        assert_eq!(calls[1], vec![json!("post"), json!(7)]);
    }
}
