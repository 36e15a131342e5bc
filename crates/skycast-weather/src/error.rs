//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Geocoding produced no usable coordinates. Transport failures collapse
    /// into this variant too; the caller cannot tell "no network" from "city
    /// truly absent" (a documented limitation of the geocoding contract).
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API error: status {status}")]
    Api { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Icon unavailable: {0}")]
    IconUnavailable(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl WeatherError {
    /// Whether displaying cached data is a sensible response to this error.
    pub fn cache_fallback_applies(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::Parse(_)
        )
    }
}
