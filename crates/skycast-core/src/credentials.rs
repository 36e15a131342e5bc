//! API credential loading.
//!
//! The weather service requires a single API key, read from the process
//! environment at startup. Absence fails fast with a clear diagnostic
//! instead of letting the remote reject an empty key later.

use crate::error::ConfigError;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Read the API key from the environment.
///
/// An unset or empty variable is a [`ConfigError::MissingSetting`].
pub fn api_key_from_env() -> Result<String, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingSetting(format!(
            "{API_KEY_ENV} environment variable (OpenWeatherMap API key)"
        ))),
    }
}
