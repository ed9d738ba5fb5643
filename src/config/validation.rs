//! Configuration validation.
//!
//! Nothing here is fatal: a service without a key or a database still
//! starts, it just rejects or fails every protected request. These checks
//! exist so the operator hears about it at startup instead.

use super::{Config, SslMode};
use thiserror::Error;

/// Problems detected in a loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationWarning {
    #[error("auth.api_key is not set; every protected request will be rejected")]
    MissingApiKey,
    #[error("auth.api_key is empty; every protected request will be rejected")]
    EmptyApiKey,
    #[error("database.url is not set; every query will fail")]
    MissingDatabaseUrl,
    #[error("database.ssl_mode is {0:?}; the store connection may not be encrypted")]
    WeakSslMode(SslMode),
}

/// Validate a configuration, returning every warning found.
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    match &config.auth.api_key {
        None => warnings.push(ValidationWarning::MissingApiKey),
        Some(key) if key.is_empty() => warnings.push(ValidationWarning::EmptyApiKey),
        Some(_) => {}
    }

    if config.database.url.as_deref().is_none_or(str::is_empty) {
        warnings.push(ValidationWarning::MissingDatabaseUrl);
    }

    if matches!(
        config.database.ssl_mode,
        SslMode::Disable | SslMode::Allow | SslMode::Prefer
    ) {
        warnings.push(ValidationWarning::WeakSslMode(config.database.ssl_mode));
    }

    warnings
}
