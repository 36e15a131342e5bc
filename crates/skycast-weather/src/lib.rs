//! Weather lookup for Skycast
//!
//! Geocodes a (city, country) pair via the OpenWeatherMap geocoding API,
//! fetches current + daily forecast weather, and keeps the last successful
//! snapshot on disk as the offline fallback.

pub mod cache;
pub mod client;
pub mod error;
pub mod geocode;
pub mod types;

pub use cache::WeatherCache;
pub use client::WeatherClient;
pub use error::WeatherError;
pub use geocode::GeocodeClient;
pub use types::*;
