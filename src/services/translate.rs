//! Translation from raw OpenWeather records into the compact
//! human-readable response served by this API.

use chrono::{DateTime, Local};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Units;
use crate::services::openweather::{CurrentWeather, ForecastDay};
use crate::services::wind::{describe_speed, direction_name};

/// The response body for `GET /weather`.
///
/// Every field is always populated except `cloudiness` (empty when the
/// provider reports no conditions) and `forecast` (present only when a
/// forecast day was requested).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HumanReadableResponse {
    /// "City, COUNTRYCODE"
    pub location_name: String,
    /// e.g. "20 °C"
    pub temperature: String,
    /// e.g. "Light breeze, 2.6 m/s, southwest"
    pub wind: String,
    pub cloudiness: String,
    /// e.g. "1025 hpa"
    pub pressure: String,
    /// e.g. "37%"
    pub humidity: String,
    /// Local "HH:MM"
    pub sunrise: String,
    /// Local "HH:MM"
    pub sunset: String,
    /// e.g. "[4.61, -74.08]"
    pub geo_coordinates: String,
    /// Local "YYYY-MM-DD HH:MM:SS", captured at translation time
    pub requested_time: String,
    /// Raw provider forecast day, embedded unmodified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastDay>,
}

/// Convert a raw current-conditions record (plus an optional forecast day)
/// into the human-readable response.
///
/// Deterministic apart from `requested_time`, which reads the wall clock.
pub fn translate(
    current: &CurrentWeather,
    units: Units,
    forecast: Option<ForecastDay>,
) -> HumanReadableResponse {
    HumanReadableResponse {
        location_name: format!(
            "{}, {}",
            title_case(&current.name),
            current.sys.country.to_uppercase()
        ),
        temperature: format!("{} {}", current.main.temp, units.symbol()),
        wind: format!(
            "{}, {} m/s, {}",
            describe_speed(current.wind.speed),
            current.wind.speed,
            direction_name(current.wind.deg)
        ),
        cloudiness: current
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        pressure: format!("{} hpa", current.main.pressure),
        humidity: format!("{}%", current.main.humidity),
        sunrise: format_local_time(current.sys.sunrise),
        sunset: format_local_time(current.sys.sunset),
        geo_coordinates: format!("[{}, {}]", current.coord.lat, current.coord.lon),
        requested_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        forecast,
    }
}

/// Render epoch seconds as local wall-clock "HH:MM".
fn format_local_time(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// Capitalize the first letter of each word, leaving the rest untouched.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
