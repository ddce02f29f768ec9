//! OpenWeather API client.
//!
//! Fetches current conditions from the `/weather` endpoint and daily
//! forecasts from the `/onecall` endpoint.
//! See: https://openweathermap.org/api

use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Per-request upstream timeout. Slow provider calls fail the request
/// instead of holding the connection open indefinitely.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the OpenWeather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    config: AppConfig,
}

// --- OpenWeather JSON response types ---

/// Current-conditions record from the `/weather` endpoint.
///
/// Only the fields the translation reads are kept; everything is
/// default-tolerant because the provider omits fields it has no data for.
#[derive(Debug, Default, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub coord: Coord,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub main: MainMetrics,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Coord {
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub lat: f64,
}

/// One entry of the provider's weather-condition list, shared between the
/// current-conditions record and daily forecasts.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WeatherCondition {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MainMetrics {
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub pressure: i64,
    #[serde(default)]
    pub humidity: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// Response from the `/onecall` endpoint. Only the daily series is used;
/// index 0 is today.
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub daily: Vec<ForecastDay>,
}

/// One day of the provider's daily forecast.
///
/// Embedded verbatim in the human-readable response, so it keeps the
/// provider's field names and serializes back out unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ForecastDay {
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
    #[serde(default)]
    pub temp: DayTemperatures,
    #[serde(default)]
    pub feels_like: DayFeelsLike,
    #[serde(default)]
    pub pressure: i64,
    #[serde(default)]
    pub humidity: i64,
    #[serde(default)]
    pub dew_point: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: i64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub clouds: i64,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub rain: f64,
    #[serde(default)]
    pub uvi: f64,
}

/// Temperature by time of day.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DayTemperatures {
    #[serde(default)]
    pub day: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub night: f64,
    #[serde(default)]
    pub eve: f64,
    #[serde(default)]
    pub morn: f64,
}

/// Perceived temperature by time of day.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DayFeelsLike {
    #[serde(default)]
    pub day: f64,
    #[serde(default)]
    pub night: f64,
    #[serde(default)]
    pub eve: f64,
    #[serde(default)]
    pub morn: f64,
}

impl OpenWeatherClient {
    pub fn new(config: AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client, config }
    }

    /// Fetch current conditions for a city/country pair.
    pub async fn current_weather(
        &self,
        city: &str,
        country: &str,
    ) -> Result<CurrentWeather, AppError> {
        let url = format!("{}/weather", self.config.base_url);
        let query = [
            ("q", format!("{},{}", city, country)),
            ("units", self.config.units.to_string()),
            ("appid", self.config.api_key.clone()),
        ];

        self.get_json(&url, &query).await
    }

    /// Fetch the daily forecast series for a coordinate.
    pub async fn one_call(&self, lat: f64, lon: f64) -> Result<OneCallResponse, AppError> {
        let url = format!("{}/onecall", self.config.base_url);
        let query = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", self.config.units.to_string()),
            ("appid", self.config.api_key.clone()),
        ];

        self.get_json(&url, &query).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("open weather request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "open weather returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("open weather JSON parse error: {}", e)))
    }
}
