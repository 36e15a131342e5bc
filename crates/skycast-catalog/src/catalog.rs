//! City catalog: the static country → cities index.
//!
//! Loaded once at startup from the flat city dataset and read-only after
//! that. Lookups go through the decorated country label (flag + name), the
//! same string the selection UI shows.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use skycast_core::CatalogError;

use crate::countries;

/// One record of the city dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    /// 2-letter country code.
    pub country: String,
}

/// Country/city lookup tables, immutable after load.
#[derive(Debug, Default)]
pub struct CityCatalog {
    /// Decorated labels ("🇫🇷 France") in dataset first-seen order of the code.
    labels: Vec<String>,
    label_to_code: HashMap<String, String>,
    label_to_name: HashMap<String, String>,
    /// Keyed by display name; city lists are sorted and deduplicated.
    cities_by_country: HashMap<String, Vec<String>>,
}

impl CityCatalog {
    /// Load the catalog from a dataset file.
    ///
    /// A missing or unparseable file is `CatalogError::DataUnavailable`;
    /// catalog features stay empty but the process keeps running.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CatalogError::DataUnavailable(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_json_slice(&bytes)?;
        tracing::info!(
            "Loaded city catalog: {} countries from {}",
            catalog.labels.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from raw dataset JSON.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<City> = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::DataUnavailable(format!("invalid city dataset: {e}")))?;
        Ok(Self::from_records(records))
    }

    /// Build the index from dataset records.
    ///
    /// Groups city names by country code, drops codes absent from the known
    /// country table, deduplicates and sorts names within each group.
    pub fn from_records(records: Vec<City>) -> Self {
        let mut code_order: Vec<String> = Vec::new();
        let mut by_code: HashMap<String, Vec<String>> = HashMap::new();

        for record in records {
            if !by_code.contains_key(&record.country) {
                code_order.push(record.country.clone());
            }
            by_code.entry(record.country).or_default().push(record.name);
        }

        let mut catalog = Self::default();
        for code in code_order {
            let Some(name) = countries::country_name(&code) else {
                tracing::debug!("Dropping unknown country code {code}");
                continue;
            };

            let mut cities = by_code.remove(&code).unwrap_or_default();
            cities.sort();
            cities.dedup();

            let label = format!("{} {}", countries::flag_glyph(&code), name);
            catalog.labels.push(label.clone());
            catalog.label_to_code.insert(label.clone(), code);
            catalog.label_to_name.insert(label, name.to_string());
            catalog.cities_by_country.insert(name.to_string(), cities);
        }
        catalog
    }

    /// Country labels in dataset first-seen order.
    pub fn country_labels(&self) -> &[String] {
        &self.labels
    }

    /// Cities for a country label, sorted and duplicate-free.
    ///
    /// Unknown labels yield an empty slice.
    pub fn cities_for(&self, label: &str) -> &[String] {
        self.label_to_name
            .get(label)
            .and_then(|name| self.cities_by_country.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 2-letter country code behind a label.
    pub fn code_for(&self, label: &str) -> Option<&str> {
        self.label_to_code.get(label).map(String::as_str)
    }

    /// True if the label names a country in the catalog.
    pub fn is_known_label(&self, label: &str) -> bool {
        self.label_to_code.contains_key(label)
    }
}
