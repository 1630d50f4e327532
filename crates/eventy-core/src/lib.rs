//! # eventy-core
//!
//! Core crate for Eventy. Contains the configuration schemas and loader,
//! logging initialisation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Eventy crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::EventyConfig;
pub use error::EventyError;
pub use result::EventyResult;
