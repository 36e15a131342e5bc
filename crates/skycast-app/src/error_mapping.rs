//! Maps service errors into `skycast_core::AppError` so every failure the
//! user sees goes through one message table.

use skycast_core::{AppError, WeatherError};
use skycast_weather::WeatherError as ServiceError;

/// Classify a weather service error into the app error hierarchy.
pub fn map_weather_error(error: ServiceError) -> AppError {
    let mapped = match error {
        ServiceError::CityNotFound(query) => WeatherError::CityNotFound(query),
        ServiceError::IconUnavailable(cause) => {
            tracing::debug!("Icon unavailable: {cause}");
            WeatherError::IconUnavailable
        }
        ServiceError::Cache(cause) => WeatherError::CacheError(cause),
        other => WeatherError::FetchFailed(other.to_string()),
    };
    AppError::Weather(mapped)
}
