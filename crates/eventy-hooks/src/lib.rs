//! # eventy-hooks
//!
//! Priority-ordered callback hooks. Provides:
//!
//! - Listener registry keyed by hook name, sorted by priority then
//!   registration order
//! - Synchronous dispatcher with filter (value-chaining) and action
//!   (side-effect) styles
//! - Callbacks as named functions, shared closures, or object methods
//! - The [`Events`] facade pairing an action registry with a filter registry

pub mod callback;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod functions;
pub mod registry;

pub use callback::{Callback, CallbackFn, HookTarget};
pub use dispatcher::Dispatcher;
pub use error::{HookError, HookResult};
pub use events::Events;
pub use functions::FunctionTable;
pub use registry::{HookRegistry, ListenerEntry};
