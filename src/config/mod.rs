//! Configuration loading and management.
//!
//! - [`types`]: config structs, TOML loading and environment overrides
//! - [`validation`]: startup sanity checks

mod types;
mod validation;

pub use types::{ApiKey, AuthConfig, Config, ConfigError, DatabaseConfig, ServerConfig, SslMode};
pub use validation::{ValidationWarning, validate};
