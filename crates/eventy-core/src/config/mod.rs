//! Configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML (or any other format the crate recognises by extension) plus
//! `EVENTY__`-prefixed environment variables. Each sub-module represents a
//! logical configuration section, and every field has a default.

pub mod hooks;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::hooks::HookConfig;
use self::logging::LoggingConfig;

use crate::error::EventyError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventyConfig {
    /// Listener registration defaults.
    #[serde(default)]
    pub hooks: HookConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EventyConfig {
    /// Load configuration for an environment.
    ///
    /// Merges `config/default`, an optional `config/{env}` overlay, and
    /// environment variables such as `EVENTY__HOOKS__DEFAULT_PRIORITY`.
    /// Missing files are not an error.
    pub fn load(env: &str) -> Result<Self, EventyError> {
        Self::load_with_prefix(env, "EVENTY")
    }

    fn load_with_prefix(env: &str, prefix: &str) -> Result<Self, EventyError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EventyError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| EventyError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single file. The file must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EventyError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
