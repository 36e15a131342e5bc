//! Offline fallback cache.
//!
//! Holds exactly one snapshot (the last successful fetch) as a JSON file,
//! overwritten on each store. When the display unit flips without a network
//! round-trip, the cached numbers are converted in place and the file is
//! re-persisted with the new unit tag.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WeatherError;
use crate::types::{Unit, WeatherSnapshot};

const CACHE_FILE: &str = "weather_cache.json";

/// Convert one temperature value toward `target`, rounding to 1 decimal.
///
/// Direction is keyed by the target unit alone, not by what the value
/// currently is. That is only sound for a two-state metric/imperial system;
/// callers must check the snapshot's unit tag before converting.
pub fn convert_temperature(value: f64, target: Unit) -> f64 {
    match target {
        Unit::Imperial => round1(value * 9.0 / 5.0 + 32.0),
        Unit::Metric => round1((value - 32.0) * 5.0 / 9.0),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn convert_snapshot(snapshot: &mut WeatherSnapshot, target: Unit) {
    snapshot.current.temp = convert_temperature(snapshot.current.temp, target);
    snapshot.current.feels_like = convert_temperature(snapshot.current.feels_like, target);
    for day in &mut snapshot.daily {
        day.temp = convert_temperature(day.temp, target);
        day.min = convert_temperature(day.min, target);
        day.max = convert_temperature(day.max, target);
    }
    snapshot.unit = target;
}

/// File-backed cache of the last successful weather snapshot.
#[derive(Debug)]
pub struct WeatherCache {
    cache_path: PathBuf,
}

impl WeatherCache {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            cache_path: config_dir.join(CACHE_FILE),
        }
    }

    /// Overwrite the cached snapshot.
    pub fn store(&self, snapshot: &WeatherSnapshot) -> Result<(), WeatherError> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).map_err(|e| WeatherError::Cache(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| WeatherError::Cache(e.to_string()))?;
        fs::write(&self.cache_path, contents).map_err(|e| WeatherError::Cache(e.to_string()))?;

        tracing::debug!("Cached weather snapshot to {}", self.cache_path.display());
        Ok(())
    }

    /// The cached snapshot, if one exists and parses.
    ///
    /// The cache is a best-effort fallback: a missing or corrupt file is
    /// `None`, never an error the caller has to handle.
    pub fn load(&self) -> Option<WeatherSnapshot> {
        let contents = match fs::read_to_string(&self.cache_path) {
            Ok(c) => c,
            Err(_) => return None,
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Ignoring corrupt weather cache: {e}");
                None
            }
        }
    }

    /// Re-derive the cached snapshot in `target` units without a fetch.
    ///
    /// When the stored unit already matches, the snapshot is returned
    /// untouched. Otherwise every temperature-bearing field is converted,
    /// the unit tag is updated, and the file is re-persisted.
    pub fn convert_to(&self, target: Unit) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let Some(mut snapshot) = self.load() else {
            return Ok(None);
        };

        if snapshot.unit == target {
            return Ok(Some(snapshot));
        }

        convert_snapshot(&mut snapshot, target);
        self.store(&snapshot)?;
        tracing::info!("Re-converted cached weather to {}", target.query_value());
        Ok(Some(snapshot))
    }
}
