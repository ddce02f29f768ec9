//! The /weather endpoint.
//!
//! GET /weather?city=<name>&country=<code>[&forecast=<0-6>]
//!
//! Consults the response cache first; on a miss, fetches current conditions
//! from OpenWeather (plus the daily forecast when requested), translates the
//! result, and caches it keyed by the verbatim request target.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::AppError;
use crate::routes::AppState;
use crate::services::openweather::{CurrentWeather, ForecastDay};
use crate::services::translate::{translate, HumanReadableResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct WeatherQuery {
    /// City name, e.g. "Bogota"
    pub city: Option<String>,
    /// Country code, e.g. "co"
    pub country: Option<String>,
    /// Forecast day index: 0 (today) through 6
    pub forecast: Option<String>,
}

/// Current weather for a city, optionally with one forecast day.
///
/// Responses are cached per request target for the configured TTL, so
/// repeated identical requests do not hit the upstream provider. The key is
/// the raw target, so requests differing only in parameter order are
/// distinct entries.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "Weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Human-readable weather for the requested city", body = HumanReadableResponse),
        (status = 422, description = "Missing or invalid query parameter", body = String),
        (status = 500, description = "Upstream provider failure", body = String),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<HumanReadableResponse>, AppError> {
    let city = require_param(params.city.as_deref(), "city")?;
    let country = require_param(params.country.as_deref(), "country")?;
    let forecast_day = parse_forecast_day(params.forecast.as_deref())?;

    let cache_key = uri.to_string();
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!(key = %cache_key, "Serving cached response");
        return Ok(Json(cached));
    }

    let current = state.client.current_weather(city, country).await?;

    let forecast = match forecast_day {
        Some(day) => Some(fetch_forecast_day(&state, &current, day).await?),
        None => None,
    };

    let response = translate(&current, state.config.units, forecast);
    state
        .cache
        .put(cache_key, response.clone(), state.config.cache_ttl)
        .await;

    Ok(Json(response))
}

fn require_param<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter(name))
}

/// An absent or empty `forecast` parameter means "no forecast"; anything
/// else must be an integer between 0 and 6.
fn parse_forecast_day(raw: Option<&str>) -> Result<Option<usize>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(day @ 0..=6) => Ok(Some(day as usize)),
            _ => Err(AppError::InvalidForecastDay),
        },
    }
}

/// Fetch the daily forecast for the coordinate of the current-conditions
/// response and select the requested day.
async fn fetch_forecast_day(
    state: &AppState,
    current: &CurrentWeather,
    day: usize,
) -> Result<ForecastDay, AppError> {
    let one_call = state
        .client
        .one_call(current.coord.lat, current.coord.lon)
        .await?;

    one_call
        .daily
        .into_iter()
        .nth(day)
        .ok_or_else(|| AppError::Upstream(format!("open weather forecast has no day {}", day)))
}
