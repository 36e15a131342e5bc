use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::Result;

use skycast_app::{Controller, ViewMessage};
use skycast_catalog::CityCatalog;
use skycast_core::SettingsStore;
use skycast_weather::{GeocodeClient, WeatherCache, WeatherClient};

const CITY_DATA_FILE: &str = "city.list.json";

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    // Missing API key is a startup failure, not an empty-response mystery.
    let api_key = skycast_core::api_key_from_env()?;

    let catalog = match CityCatalog::load(CITY_DATA_FILE) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{}", skycast_core::AppError::from(e).user_message());
            CityCatalog::default()
        }
    };

    let settings_path = SettingsStore::default_path()?;
    let config_dir = settings_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let store = SettingsStore::open(settings_path.clone())?;

    let (tx, rx) = channel();
    let controller = Controller::new(
        catalog,
        store,
        GeocodeClient::new(api_key.clone())?,
        WeatherClient::new(api_key)?,
        WeatherCache::new(&config_dir),
        tx,
    );

    tracing::info!(
        "Skycast started ({} countries, theme {:?})",
        controller.country_labels().len(),
        controller.current_theme(),
    );

    let (country, city) = controller.default_location();
    if country.is_empty() || city.is_empty() {
        println!("No default location configured yet.");
        println!(
            "Set one in {} or pick a country and city in the app.",
            settings_path.display()
        );
        return Ok(());
    }

    controller.request_fetch(&country, &city).await;

    for message in rx.try_iter() {
        match message {
            ViewMessage::Fetching => println!("Fetching weather for {city}, {country}..."),
            ViewMessage::Weather { text, icon } => {
                println!("{text}");
                if let Some(bytes) = icon {
                    println!("[icon: {} bytes]", bytes.len());
                }
            }
            ViewMessage::Cooldown { label: Some(label) } => println!("{label}"),
            ViewMessage::Cooldown { label: None } => {}
            ViewMessage::Theme(theme) => tracing::debug!("Theme changed: {theme:?}"),
            ViewMessage::Error(message) => println!("{message}"),
        }
    }

    Ok(())
}
