//! Fetch workflow orchestration.
//!
//! The controller owns all process-wide mutable state (settings, cache,
//! cooldown, language) as one explicit struct and drives the cooldown-gated
//! fetch-and-cache workflow. Results travel to the rendering surface as
//! [`ViewMessage`]s over an mpsc channel; the surface only ever receives
//! display strings and raw image bytes.

use std::sync::mpsc::Sender;
use std::time::Duration;

use parking_lot::Mutex;

use skycast_catalog::{filter, CityCatalog};
use skycast_core::{AppError, CatalogError, SettingsStore};
use skycast_weather::{GeocodeClient, WeatherCache, WeatherClient, WeatherSnapshot};

use crate::cooldown::CooldownState;
use crate::error_mapping::map_weather_error;
use crate::render;
use crate::theme::Theme;

const DEFAULT_LANGUAGE: &str = "en";

/// Messages sent from the workflow to the rendering surface.
#[derive(Debug)]
pub enum ViewMessage {
    /// A fetch is in flight; show a transient state.
    Fetching,
    /// Weather text ready to display. `icon` holds raw PNG bytes when the
    /// icon endpoint answered; `None` leaves the icon slot empty.
    Weather { text: String, icon: Option<Vec<u8>> },
    /// Countdown text while cooling down, `None` once fetch re-enables.
    Cooldown { label: Option<String> },
    /// Theme descriptor to apply.
    Theme(Theme),
    /// User-facing error text.
    Error(String),
}

struct AppState {
    store: SettingsStore,
    cooldown: CooldownState,
    language: String,
}

/// Application workflow controller.
pub struct Controller {
    catalog: CityCatalog,
    geocode: GeocodeClient,
    weather: WeatherClient,
    cache: WeatherCache,
    state: Mutex<AppState>,
    tx: Sender<ViewMessage>,
}

impl Controller {
    pub fn new(
        catalog: CityCatalog,
        store: SettingsStore,
        geocode: GeocodeClient,
        weather: WeatherClient,
        cache: WeatherCache,
        tx: Sender<ViewMessage>,
    ) -> Self {
        Self {
            catalog,
            geocode,
            weather,
            cache,
            state: Mutex::new(AppState {
                store,
                cooldown: CooldownState::Ready,
                language: DEFAULT_LANGUAGE.to_string(),
            }),
            tx,
        }
    }

    fn send(&self, message: ViewMessage) {
        let _ = self.tx.send(message);
    }

    /// Country labels for the selection list.
    pub fn country_labels(&self) -> &[String] {
        self.catalog.country_labels()
    }

    /// Cities for the picked country label.
    pub fn cities_for(&self, country_label: &str) -> &[String] {
        self.catalog.cities_for(country_label)
    }

    /// Narrow the city list as the user types.
    pub fn filter_cities(&self, country_label: &str, typed: &str) -> Vec<String> {
        filter::filter(self.catalog.cities_for(country_label), typed)
    }

    /// Narrow the country list as the user types.
    pub fn filter_countries(&self, typed: &str) -> Vec<String> {
        filter::filter(self.catalog.country_labels(), typed)
    }

    /// Recent searches, most recent last.
    pub fn recent_searches(&self) -> Vec<String> {
        self.state.lock().store.recent_searches().to_vec()
    }

    /// The persisted default location as (country label, city).
    pub fn default_location(&self) -> (String, String) {
        let state = self.state.lock();
        (
            state.store.settings.country.clone(),
            state.store.settings.city.clone(),
        )
    }

    /// Theme for the current dark-mode preference.
    pub fn current_theme(&self) -> Theme {
        Theme::for_mode(self.state.lock().store.settings.dark_mode)
    }

    /// True while the fetch trigger is disabled.
    pub fn is_cooling_down(&self) -> bool {
        !self.state.lock().cooldown.can_fetch()
    }

    /// Dispatch the fetch workflow for a (country label, city) selection.
    ///
    /// Observable sequencing: one transient `Fetching` message, then exactly
    /// one result message, then the cooldown restart. The cooldown restarts
    /// after every dispatch, including when geocoding failed before any
    /// weather call was made.
    pub async fn request_fetch(&self, country_label: &str, city: &str) {
        if country_label.is_empty() || city.is_empty() {
            self.send(ViewMessage::Error(
                "Please select a country and city.".to_string(),
            ));
            return;
        }

        {
            let state = self.state.lock();
            if !state.cooldown.can_fetch() {
                let label = state.cooldown.countdown_label();
                drop(state);
                self.send(ViewMessage::Cooldown { label });
                return;
            }
        }

        let Some(country_code) = self.catalog.code_for(country_label).map(str::to_string) else {
            let err = AppError::from(CatalogError::UnknownCountry(country_label.to_string()));
            self.send(ViewMessage::Error(err.user_message().to_string()));
            return;
        };

        let (unit, language) = {
            let mut state = self.state.lock();
            state.store.record_search(city);
            (state.store.settings.unit, state.language.clone())
        };

        self.send(ViewMessage::Fetching);

        let result = match self.geocode.resolve(city, &country_code).await {
            Ok(coords) => self.weather.fetch(coords, unit, &language).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(snapshot) => {
                if let Err(e) = self.cache.store(&snapshot) {
                    tracing::warn!("Failed to cache weather snapshot: {e}");
                }
                {
                    let mut state = self.state.lock();
                    state.store.set_default_location(country_label, city);
                    if let Err(e) = state.store.save() {
                        tracing::warn!("Failed to save settings: {e}");
                    }
                }
                self.show_snapshot(&snapshot, false).await;
            }
            Err(e) if e.cache_fallback_applies() => match self.cache.load() {
                Some(snapshot) => {
                    tracing::info!("Fetch failed ({e}); showing cached weather");
                    self.show_snapshot(&snapshot, true).await;
                }
                None => {
                    let err = map_weather_error(e);
                    self.send(ViewMessage::Error(err.user_message().to_string()));
                }
            },
            Err(e) => {
                let err = map_weather_error(e);
                self.send(ViewMessage::Error(err.user_message().to_string()));
            }
        }

        self.start_cooldown();
    }

    async fn show_snapshot(&self, snapshot: &WeatherSnapshot, offline: bool) {
        let mut text = render::full_report(snapshot);
        if offline {
            text.push_str(render::OFFLINE_SUFFIX);
        }
        let icon = self.try_icon(&snapshot.current.icon_id).await;
        self.send(ViewMessage::Weather { text, icon });
    }

    async fn try_icon(&self, icon_id: &str) -> Option<Vec<u8>> {
        match self.weather.fetch_icon(icon_id).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!("Icon fetch failed: {e}");
                None
            }
        }
    }

    /// Flip the unit preference and re-derive the display from cache.
    ///
    /// No network round-trip for the weather itself: cached temperatures
    /// are numerically re-converted toward the new unit. With an empty
    /// cache there is nothing to re-render.
    pub async fn toggle_units(&self) {
        let target = {
            let mut state = self.state.lock();
            let target = state.store.settings.unit.toggled();
            state.store.settings.unit = target;
            if let Err(e) = state.store.save() {
                tracing::warn!("Failed to save settings: {e}");
            }
            target
        };

        match self.cache.convert_to(target) {
            Ok(Some(snapshot)) => self.show_snapshot(&snapshot, false).await,
            Ok(None) => {
                tracing::debug!("Unit toggled with empty cache; nothing to re-render");
            }
            Err(e) => {
                let err = map_weather_error(e);
                self.send(ViewMessage::Error(err.user_message().to_string()));
            }
        }
    }

    /// Flip dark mode and publish the new theme descriptor.
    pub fn toggle_theme(&self) {
        let theme = {
            let mut state = self.state.lock();
            let dark = !state.store.settings.dark_mode;
            state.store.settings.dark_mode = dark;
            if let Err(e) = state.store.save() {
                tracing::warn!("Failed to save settings: {e}");
            }
            Theme::for_mode(dark)
        };
        self.send(ViewMessage::Theme(theme));
    }

    /// Language passed to subsequent weather fetches.
    pub fn set_language(&self, language: &str) {
        self.state.lock().language = language.to_string();
    }

    /// Set the default location without fetching.
    pub fn change_default_location(&self, country_label: &str, city: &str) {
        if !self.catalog.is_known_label(country_label) {
            let err = AppError::from(CatalogError::UnknownCountry(country_label.to_string()));
            self.send(ViewMessage::Error(err.user_message().to_string()));
            return;
        }

        let mut state = self.state.lock();
        state.store.set_default_location(country_label, city);
        if let Err(e) = state.store.save() {
            tracing::warn!("Failed to save settings: {e}");
        }
    }

    /// Advance the cooldown by one second and report the countdown.
    pub fn tick_cooldown(&self) {
        let mut state = self.state.lock();
        if state.cooldown.can_fetch() {
            return;
        }
        state.cooldown = state.cooldown.tick();
        let label = state.cooldown.countdown_label();
        drop(state);
        self.send(ViewMessage::Cooldown { label });
    }

    fn start_cooldown(&self) {
        let mut state = self.state.lock();
        state.cooldown = state.cooldown.start();
        let label = state.cooldown.countdown_label();
        drop(state);
        self.send(ViewMessage::Cooldown { label });
    }

    /// Drive the countdown with a one-second tick until it expires.
    ///
    /// Self-rescheduling like the original timer callback: one tick per
    /// second, stopping once the state machine reports ready.
    pub async fn run_cooldown(&self) {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;
        while self.is_cooling_down() {
            interval.tick().await;
            self.tick_cooldown();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::sync::mpsc::{channel, Receiver};

    use skycast_catalog::City;
    use skycast_core::Unit;
    use skycast_weather::CurrentConditions;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FR_LABEL: &str = "\u{1F1EB}\u{1F1F7} France";

    struct Harness {
        controller: Controller,
        rx: Receiver<ViewMessage>,
        dir: tempfile::TempDir,
    }

    fn snapshot(temp: f64, unit: Unit) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp,
                feels_like: temp,
                humidity: 65,
                wind_speed: 3.0,
                description: "clear sky".to_string(),
                icon_id: "01d".to_string(),
            },
            daily: Vec::new(),
            unit,
            fetched_at: chrono::Utc::now(),
        }
    }

    fn harness(server: &MockServer) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse(&server.uri()).unwrap();

        let catalog = CityCatalog::from_records(vec![City {
            name: "Paris".to_string(),
            country: "FR".to_string(),
        }]);
        let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        let geocode = GeocodeClient::with_base_url("test-key", base.clone()).unwrap();
        let weather = WeatherClient::with_base_urls("test-key", base.clone(), base).unwrap();
        let cache = WeatherCache::new(dir.path());

        let (tx, rx) = channel();
        Harness {
            controller: Controller::new(catalog, store, geocode, weather, cache, tx),
            rx,
            dir,
        }
    }

    fn drain(rx: &Receiver<ViewMessage>) -> Vec<ViewMessage> {
        rx.try_iter().collect()
    }

    async fn mount_geocode_ok(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": 48.8566, "lon": 2.3522}
            ])))
            .mount(server)
            .await;
    }

    async fn mount_weather_ok(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {
                    "temp": 20.0,
                    "feels_like": 19.0,
                    "humidity": 65,
                    "wind_speed": 3.4,
                    "weather": [{"description": "clear sky", "icon": "01d"}]
                },
                "daily": []
            })))
            .mount(server)
            .await;
    }

    async fn mount_weather_error(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .respond_with(ResponseTemplate::new(500))
            .mount(server)
            .await;
    }

    async fn mount_icon_ok(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/img/wn/01d@2x.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn successful_fetch_emits_fetching_weather_cooldown() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_ok(&server).await;
        mount_icon_ok(&server).await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Paris").await;

        let messages = drain(&h.rx);
        assert!(matches!(messages[0], ViewMessage::Fetching));
        match &messages[1] {
            ViewMessage::Weather { text, icon } => {
                assert!(text.contains("Temperature: 20°C"));
                assert!(!text.contains("Offline mode"));
                assert_eq!(icon.as_deref(), Some(b"png".as_slice()));
            }
            other => panic!("expected weather message, got {other:?}"),
        }
        assert!(matches!(
            &messages[2],
            ViewMessage::Cooldown { label: Some(_) }
        ));
        assert!(h.controller.is_cooling_down());
    }

    #[tokio::test]
    async fn successful_fetch_persists_cache_settings_and_history() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_ok(&server).await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Paris").await;

        let cache = WeatherCache::new(h.dir.path());
        assert_eq!(cache.load().unwrap().current.temp, 20.0);

        let reloaded = SettingsStore::open(h.dir.path().join("settings.json")).unwrap();
        assert_eq!(reloaded.settings.country, FR_LABEL);
        assert_eq!(reloaded.settings.city, "Paris");
        assert_eq!(reloaded.settings.search_history, vec!["Paris"]);
    }

    #[tokio::test]
    async fn geocode_failure_reports_city_not_found_and_starts_cooldown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Atlantis").await;

        let messages = drain(&h.rx);
        assert!(matches!(messages[0], ViewMessage::Fetching));
        assert!(matches!(&messages[1], ViewMessage::Error(m) if m == "City not found."));
        // Cooldown restarts even though no weather call was made.
        assert!(h.controller.is_cooling_down());
    }

    #[tokio::test]
    async fn fetch_failure_with_cache_shows_offline_data() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_error(&server).await;

        let h = harness(&server);
        WeatherCache::new(h.dir.path())
            .store(&snapshot(20.0, Unit::Metric))
            .unwrap();

        h.controller.request_fetch(FR_LABEL, "Paris").await;

        let messages = drain(&h.rx);
        match &messages[1] {
            ViewMessage::Weather { text, icon } => {
                assert!(text.contains("Temperature: 20°C"));
                assert!(text.contains("Offline mode: showing cached data"));
                // Icon endpoint is unmatched, so the slot stays empty.
                assert!(icon.is_none());
            }
            other => panic!("expected weather message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_failure_without_cache_is_explicit_unavailable_state() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_error(&server).await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Paris").await;

        let messages = drain(&h.rx);
        assert!(
            matches!(&messages[1], ViewMessage::Error(m) if m == "Could not fetch weather.")
        );
    }

    #[tokio::test]
    async fn second_fetch_is_blocked_while_cooling_down() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_ok(&server).await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Paris").await;
        drain(&h.rx);

        h.controller.request_fetch(FR_LABEL, "Paris").await;
        let messages = drain(&h.rx);
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            ViewMessage::Cooldown { label: Some(_) }
        ));
    }

    #[tokio::test]
    async fn cooldown_expires_after_full_tick_count() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        mount_weather_ok(&server).await;

        let h = harness(&server);
        h.controller.request_fetch(FR_LABEL, "Paris").await;

        for _ in 0..crate::cooldown::COOLDOWN_SECS {
            h.controller.tick_cooldown();
        }
        assert!(!h.controller.is_cooling_down());

        let messages = drain(&h.rx);
        assert!(matches!(
            messages.last(),
            Some(ViewMessage::Cooldown { label: None })
        ));
    }

    #[tokio::test]
    async fn unit_toggle_rederives_display_from_cache() {
        let server = MockServer::start().await;
        let h = harness(&server);
        WeatherCache::new(h.dir.path())
            .store(&snapshot(20.0, Unit::Metric))
            .unwrap();

        h.controller.toggle_units().await;
        let messages = drain(&h.rx);
        match &messages[0] {
            ViewMessage::Weather { text, .. } => {
                assert!(text.contains("Temperature: 68°F"));
            }
            other => panic!("expected weather message, got {other:?}"),
        }
        assert_eq!(
            WeatherCache::new(h.dir.path()).load().unwrap().unit,
            Unit::Imperial
        );

        // Toggling back re-derives ~20°C from the converted value.
        h.controller.toggle_units().await;
        let messages = drain(&h.rx);
        match &messages[0] {
            ViewMessage::Weather { text, .. } => {
                assert!(text.contains("Temperature: 20°C"));
            }
            other => panic!("expected weather message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unit_toggle_with_empty_cache_emits_nothing() {
        let server = MockServer::start().await;
        let h = harness(&server);

        h.controller.toggle_units().await;
        assert!(drain(&h.rx).is_empty());

        // The flipped preference is still persisted.
        let reloaded = SettingsStore::open(h.dir.path().join("settings.json")).unwrap();
        assert_eq!(reloaded.settings.unit, Unit::Imperial);
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let server = MockServer::start().await;
        let h = harness(&server);

        h.controller.request_fetch("", "").await;
        let messages = drain(&h.rx);
        assert!(
            matches!(&messages[0], ViewMessage::Error(m) if m == "Please select a country and city.")
        );
        assert!(!h.controller.is_cooling_down());
    }

    #[tokio::test]
    async fn unknown_country_label_is_rejected() {
        let server = MockServer::start().await;
        let h = harness(&server);

        h.controller.request_fetch("Narnia", "Paris").await;
        let messages = drain(&h.rx);
        assert!(matches!(&messages[0], ViewMessage::Error(m) if m == "Invalid country name."));
    }

    #[tokio::test]
    async fn theme_toggle_emits_descriptor_and_persists() {
        let server = MockServer::start().await;
        let h = harness(&server);

        h.controller.toggle_theme();
        let messages = drain(&h.rx);
        assert!(matches!(messages[0], ViewMessage::Theme(t) if t == crate::theme::DARK));

        let reloaded = SettingsStore::open(h.dir.path().join("settings.json")).unwrap();
        assert!(reloaded.settings.dark_mode);
    }

    #[tokio::test]
    async fn language_preference_reaches_the_weather_query() {
        let server = MockServer::start().await;
        mount_geocode_ok(&server).await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .and(wiremock::matchers::query_param("lang", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {
                    "temp": 20.0,
                    "feels_like": 19.0,
                    "humidity": 65,
                    "wind_speed": 3.4,
                    "weather": [{"description": "ciel dégagé", "icon": "01d"}]
                }
            })))
            .mount(&server)
            .await;

        let h = harness(&server);
        h.controller.set_language("fr");
        h.controller.request_fetch(FR_LABEL, "Paris").await;

        let messages = drain(&h.rx);
        assert!(
            matches!(&messages[1], ViewMessage::Weather { text, .. } if text.contains("Ciel dégagé"))
        );
    }

    #[tokio::test]
    async fn change_default_location_validates_the_label() {
        let server = MockServer::start().await;
        let h = harness(&server);

        h.controller.change_default_location(FR_LABEL, "Paris");
        assert!(drain(&h.rx).is_empty());
        let reloaded = SettingsStore::open(h.dir.path().join("settings.json")).unwrap();
        assert_eq!(reloaded.settings.city, "Paris");

        h.controller.change_default_location("Narnia", "Paris");
        let messages = drain(&h.rx);
        assert!(matches!(&messages[0], ViewMessage::Error(m) if m == "Invalid country name."));
    }

    #[tokio::test]
    async fn filters_narrow_cities_and_countries() {
        let server = MockServer::start().await;
        let h = harness(&server);

        let cities = h.controller.filter_cities(FR_LABEL, "Pari");
        assert_eq!(cities, ["Paris"]);
        assert!(h.controller.filter_cities(FR_LABEL, "").is_empty());

        let countries = h.controller.filter_countries("Franc");
        assert_eq!(countries, [FR_LABEL]);
    }
}
