//! OpenWeatherMap "current + forecast" client and icon retrieval.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::WeatherError;
use crate::types::{Coordinates, CurrentConditions, DayForecast, Unit, WeatherSnapshot};

const ONECALL_BASE_URL: &str = "https://api.openweathermap.org";
const ICON_BASE_URL: &str = "http://openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Forecast days consumed from the response.
pub const MAX_FORECAST_DAYS: usize = 7;

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: ApiCurrent,
    #[serde(default)]
    daily: Vec<ApiDaily>,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiDaily {
    temp: ApiDailyTemp,
    #[serde(default)]
    weather: Vec<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiDailyTemp {
    day: f64,
    min: f64,
    max: f64,
}

impl ApiCondition {
    fn description_or_default(conditions: &[ApiCondition]) -> String {
        conditions
            .first()
            .map(|c| c.description.clone())
            .unwrap_or_default()
    }
}

/// Client for the weather and icon endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: Url,
    icon_base_url: Url,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_urls(
            api_key,
            Url::parse(ONECALL_BASE_URL)?,
            Url::parse(ICON_BASE_URL)?,
        )
    }

    /// Build a client against non-default endpoints (tests, proxies).
    pub fn with_base_urls(
        api_key: impl Into<String>,
        base_url: Url,
        icon_base_url: Url,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            icon_base_url,
        })
    }

    /// Fetch current conditions and the daily forecast for `coords`.
    ///
    /// Transport and HTTP failures surface their cause; the caller decides
    /// whether to fall back to the cached snapshot.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn fetch(
        &self,
        coords: Coordinates,
        unit: Unit,
        lang: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.base_url.join("data/3.0/onecall")?;

        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", unit.query_value()),
                ("lang", lang),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather endpoint returned status {status}");
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let body: OneCallResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let current = CurrentConditions {
            temp: body.current.temp,
            feels_like: body.current.feels_like,
            humidity: body.current.humidity,
            wind_speed: body.current.wind_speed,
            description: ApiCondition::description_or_default(&body.current.weather),
            icon_id: body
                .current
                .weather
                .first()
                .map(|c| c.icon.clone())
                .unwrap_or_else(|| "01d".to_string()),
        };

        let daily = body
            .daily
            .iter()
            .take(MAX_FORECAST_DAYS)
            .map(|d| DayForecast {
                temp: d.temp.day,
                min: d.temp.min,
                max: d.temp.max,
                description: ApiCondition::description_or_default(&d.weather),
            })
            .collect();

        Ok(WeatherSnapshot {
            current,
            daily,
            unit,
            fetched_at: Utc::now(),
        })
    }

    /// Fetch the raw PNG bytes for a weather icon code.
    ///
    /// Failures are non-fatal to the weather display; the caller leaves the
    /// icon slot empty.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_icon(&self, icon_id: &str) -> Result<Vec<u8>, WeatherError> {
        let url = self
            .icon_base_url
            .join(&format!("img/wn/{icon_id}@2x.png"))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::IconUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WeatherError::IconUnavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherError::IconUnavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
