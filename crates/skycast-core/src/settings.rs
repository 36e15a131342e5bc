//! User settings persistence.
//!
//! Default country/city, temperature unit, theme, and a bounded search
//! history, stored as a flat JSON file. Every field is optional in the file
//! and defaulted on load, so settings written by older builds keep working.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

const SETTINGS_FILE: &str = "settings.json";

/// Persisted search history keeps the last 10 entries, most recent last.
pub const HISTORY_LIMIT: usize = 10;

/// Temperature unit preference.
///
/// Deliberately two-state: cached weather is numerically re-converted in
/// place when the preference flips, and that conversion is keyed by the
/// target unit alone (see the weather cache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// The other unit.
    pub fn toggled(self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }

    /// Value for the weather API `units` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    /// Temperature suffix for display.
    pub fn temp_label(self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    /// Wind speed suffix for display.
    pub fn speed_label(self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

/// User settings, the single source of truth across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Country label of the default location (e.g. "🇫🇷 France").
    #[serde(default)]
    pub country: String,

    /// City name of the default location.
    #[serde(default)]
    pub city: String,

    /// Temperature unit preference.
    #[serde(default)]
    pub unit: Unit,

    /// Dark mode enabled.
    #[serde(default)]
    pub dark_mode: bool,

    /// Recently searched cities, most recent last.
    #[serde(default)]
    pub search_history: Vec<String>,
}

/// File-backed settings store.
///
/// There is no implicit autosave: every mutation site calls [`save`]
/// explicitly.
///
/// [`save`]: SettingsStore::save
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsStore {
    /// Default settings path under the user's config directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("config directory".into()))?
            .join("skycast");
        Ok(config_dir.join(SETTINGS_FILE))
    }

    /// Open the store at `path`, loading existing settings.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self {
                path,
                settings: Settings::default(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(Self { path, settings })
    }

    /// Record a searched city.
    ///
    /// Appends only if the city is not already in the in-memory list; the
    /// list is trimmed to [`HISTORY_LIMIT`] entries at save time, not here.
    pub fn record_search(&mut self, city: &str) {
        if !self.settings.search_history.iter().any(|c| c == city) {
            self.settings.search_history.push(city.to_string());
        }
    }

    /// Set the default location shown on startup.
    pub fn set_default_location(&mut self, country: &str, city: &str) {
        self.settings.country = country.to_string();
        self.settings.city = city.to_string();
    }

    /// The most recent searches, bounded the same way the persisted list is.
    pub fn recent_searches(&self) -> &[String] {
        let history = &self.settings.search_history;
        let start = history.len().saturating_sub(HISTORY_LIMIT);
        &history[start..]
    }

    /// Write settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut persisted = self.settings.clone();
        let start = persisted.search_history.len().saturating_sub(HISTORY_LIMIT);
        persisted.search_history = persisted.search_history[start..].to_vec();

        let contents = serde_json::to_string_pretty(&persisted)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        fs::write(&self.path, contents)?;

        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
