use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use skycast_core::Unit;

/// Geographic coordinates of a resolved city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    /// OpenWeatherMap icon code, e.g. "01d".
    pub icon_id: String,
}

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub temp: f64,
    pub min: f64,
    pub max: f64,
    pub description: String,
}

/// One fetched weather result: current conditions plus up to 7 forecast
/// days, tagged with the unit it was fetched (or last converted) in.
///
/// The unit tag is part of the snapshot's identity: unit conversion mutates
/// the numbers in place, so a snapshot is only meaningful together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DayForecast>,
    pub unit: Unit,
    pub fetched_at: DateTime<Utc>,
}

/// Emoji summarizing a weather description.
pub fn emoji_for_description(description: &str) -> &'static str {
    let description = description.to_lowercase();
    if description.contains("cloud") {
        return "☁️";
    }
    if description.contains("rain") {
        return "🌧️";
    }
    if description.contains("sun") || description.contains("clear") {
        return "☀️";
    }
    if description.contains("snow") {
        return "❄️";
    }
    if description.contains("storm") {
        return "⛈️";
    }
    "🌈"
}
