use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default cache TTL when `CACHE_EXPIRATION` is unset or unparsable.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeather API base URL (e.g. "https://api.openweathermap.org/data/2.5").
    pub base_url: String,
    pub api_key: String,
    pub units: Units,
    pub server_address: String,
    /// How long translated responses stay cached.
    pub cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WEATHER_BASEURL").expect("WEATHER_BASEURL must be set"),
            api_key: std::env::var("WEATHER_APIKEY").expect("WEATHER_APIKEY must be set"),
            units: match std::env::var("WEATHER_UNITS") {
                Ok(raw) => raw
                    .parse()
                    .expect("WEATHER_UNITS must be one of: standard, metric, imperial"),
                Err(_) => Units::default(),
            },
            server_address: std::env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:10000".to_string()),
            cache_ttl: cache_ttl_from_env(),
        }
    }
}

/// Parse `CACHE_EXPIRATION` (whole seconds). Unparsable values fall back to
/// the two-minute default with a warning rather than failing startup.
fn cache_ttl_from_env() -> Duration {
    match std::env::var("CACHE_EXPIRATION") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                tracing::warn!(
                    "Unable to parse CACHE_EXPIRATION '{}', defaulting to two minutes",
                    raw
                );
                DEFAULT_CACHE_TTL
            }
        },
        Err(_) => DEFAULT_CACHE_TTL,
    }
}

/// Measurement system requested from OpenWeather.
///
/// `Display` renders the value used in the upstream `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    Standard,
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Temperature symbol shown in the human-readable response.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        };
        f.write_str(value)
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(format!(
                "invalid units '{}', use: standard, metric, imperial",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        std::env::set_var("WEATHER_BASEURL", "https://api.openweathermap.org/data/2.5");
        std::env::set_var("WEATHER_APIKEY", "test-key");
        std::env::remove_var("WEATHER_UNITS");
        std::env::remove_var("SERVER_ADDRESS");
        std::env::remove_var("CACHE_EXPIRATION");

        let config = AppConfig::from_env();

        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.server_address, "0.0.0.0:10000");
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Units::Metric.symbol(), "°C");
        assert_eq!(Units::Standard.symbol(), "K");
        assert_eq!(Units::Imperial.symbol(), "°F");
    }

    #[test]
    fn test_units_round_trip() {
        for raw in ["standard", "metric", "imperial"] {
            let units: Units = raw.parse().unwrap();
            assert_eq!(units.to_string(), raw);
        }
        assert!("celsius".parse::<Units>().is_err());
    }
}
