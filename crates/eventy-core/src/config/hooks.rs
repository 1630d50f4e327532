//! Listener registration defaults.

use serde::{Deserialize, Serialize};

/// Priority used when a listener is registered without one.
pub const DEFAULT_PRIORITY: i32 = 20;

/// Argument count (including the running value for filters) used when a
/// listener is registered without one.
pub const DEFAULT_ARGUMENTS: usize = 1;

/// Defaults applied by the registry's `*_default` operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Priority for listeners added or removed without an explicit one.
    /// Lower runs first.
    #[serde(default = "default_priority")]
    pub default_priority: i32,
    /// Number of arguments forwarded to a listener registered without an
    /// explicit count. For filters this includes the running value.
    #[serde(default = "default_arguments")]
    pub default_arguments: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            default_arguments: DEFAULT_ARGUMENTS,
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_arguments() -> usize {
    DEFAULT_ARGUMENTS
}
