//! Forward geocoding: resolve a (city, country) pair to coordinates.
//! Uses the OpenWeatherMap direct geocoding API.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::WeatherError;
use crate::types::Coordinates;

const GEO_BASE_URL: &str = "http://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GeoRecord {
    lat: f64,
    lon: f64,
}

/// Client for the geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeocodeClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let base_url = Url::parse(GEO_BASE_URL)?;
        Self::with_base_url(api_key, base_url)
    }

    /// Build a client against a non-default endpoint (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Resolve a city and 2-letter country code to coordinates.
    ///
    /// Every failure mode collapses to `CityNotFound`: transport errors,
    /// non-success statuses, and an empty result array all look the same to
    /// the caller. The underlying cause is logged at debug level.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn resolve(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<Coordinates, WeatherError> {
        let query = format!("{city},{country_code}");
        let url = self.base_url.join("geo/1.0/direct")?;

        let response = match self
            .client
            .get(url)
            .query(&[
                ("q", query.as_str()),
                ("limit", "1"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode request failed: {e}");
                return Err(WeatherError::CityNotFound(query));
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return Err(WeatherError::CityNotFound(query));
        }

        let records: Vec<GeoRecord> = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode parse error: {e}");
                return Err(WeatherError::CityNotFound(query));
            }
        };

        match records.first() {
            Some(record) => {
                let coords = Coordinates {
                    lat: record.lat,
                    lon: record.lon,
                };
                tracing::info!("Resolved {query} to {},{}", coords.lat, coords.lon);
                Ok(coords)
            }
            None => Err(WeatherError::CityNotFound(query)),
        }
    }
}
