//! Tracing subscriber setup for host applications.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::logging::LoggingConfig;
use crate::error::{ErrorKind, EventyError};

/// Install a global `tracing` subscriber from configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), EventyError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| EventyError {
        kind: ErrorKind::Configuration,
        message: format!("Failed to install tracing subscriber: {e}"),
        source: Some(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        // Only one global subscriber can exist per process.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
