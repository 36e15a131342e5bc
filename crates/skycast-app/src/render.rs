//! Display-string rendering.
//!
//! Turns a weather snapshot into the text block the rendering surface
//! shows. Temperatures and wind speed are rounded to whole numbers for
//! display; the cached values keep their precision.

use skycast_weather::{emoji_for_description, WeatherSnapshot};

/// Annotation appended when cached data stands in for a live fetch.
pub const OFFLINE_SUFFIX: &str = "\n(Offline mode: showing cached data)";

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Current-conditions text block.
pub fn weather_text(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let description = capitalize(&current.description);
    let emoji = emoji_for_description(&current.description);
    let temp_label = snapshot.unit.temp_label();
    let speed_label = snapshot.unit.speed_label();

    format!(
        "{emoji} {description}\n\
         Temperature: {temp:.0}{temp_label}\n\
         Feels like: {feels:.0}{temp_label}\n\
         Humidity: {humidity}%\n\
         Wind Speed: {wind:.0} {speed_label}",
        temp = current.temp,
        feels = current.feels_like,
        humidity = current.humidity,
        wind = current.wind_speed,
    )
}

/// Current conditions plus forecast lines when a forecast is present.
pub fn full_report(snapshot: &WeatherSnapshot) -> String {
    let mut text = weather_text(snapshot);
    let forecast = forecast_text(snapshot);
    if !forecast.is_empty() {
        text.push('\n');
        text.push_str(&forecast);
    }
    text
}

/// Daily forecast lines, one per day; empty when no forecast was fetched.
pub fn forecast_text(snapshot: &WeatherSnapshot) -> String {
    let temp_label = snapshot.unit.temp_label();
    snapshot
        .daily
        .iter()
        .enumerate()
        .map(|(i, day)| {
            format!(
                "Day {n}: {temp:.0}{temp_label} (min {min:.0}{temp_label}, max {max:.0}{temp_label}) - {desc}",
                n = i + 1,
                temp = day.temp,
                min = day.min,
                max = day.max,
                desc = capitalize(&day.description),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
