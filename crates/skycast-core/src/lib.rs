pub mod credentials;
pub mod error;
pub mod settings;

pub use credentials::{api_key_from_env, API_KEY_ENV};
pub use error::{AppError, CatalogError, ConfigError, WeatherError};
pub use settings::{Settings, SettingsStore, Unit};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
