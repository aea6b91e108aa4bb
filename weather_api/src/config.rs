use redact::Secret;
use serde::Deserialize;
use std::{net::SocketAddr, time::Duration};

use crate::weatherapi::{
    DEFAULT_BASE_URL, DEFAULT_LOCATION, UpstreamQuery, WeatherSettings,
};

/// Fields whose env values are taken as written, so keys and postal codes
/// made of digits keep their leading zeros.
pub const STRING_KEYS: &[&str] =
    &["weather_api_key", "weather_api_url", "weather_location", "site_title"];

/// Service configuration, read from the environment.
///
/// Every field has a default, so an empty environment still starts the
/// service. Without `WEATHER_API_KEY` the upstream rejects every request.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "site_app::de::secret_string")]
    pub weather_api_key: Secret<String>,

    pub weather_api_url: String,

    #[serde(deserialize_with = "site_app::de::string_or_number")]
    pub weather_location: String,

    /// Sends `aqi=yes` when set.
    pub weather_aqi: bool,

    pub weather_timeout_secs: Option<u64>,

    /// Report failures with 502/504 instead of 200.
    pub weather_error_status: bool,

    pub listen_addr: SocketAddr,

    pub site_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_key: Secret::new(String::new()),
            weather_api_url: DEFAULT_BASE_URL.to_string(),
            weather_location: DEFAULT_LOCATION.to_string(),
            weather_aqi: false,
            weather_timeout_secs: None,
            weather_error_status: false,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            site_title: site_shell::DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn weather_settings(&self) -> WeatherSettings {
        WeatherSettings {
            base_url: self.weather_api_url.clone(),
            api_key: self.weather_api_key.clone(),
            timeout: self.weather_timeout_secs.map(Duration::from_secs),
        }
    }

    #[must_use]
    pub fn upstream_query(&self) -> UpstreamQuery {
        UpstreamQuery {
            location: self.weather_location.clone(),
            aqi: self.weather_aqi,
        }
    }

    #[must_use]
    pub fn has_weather_api_key(&self) -> bool {
        !self.weather_api_key.expose_secret().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WEATHER_API_KEY", "abc123");

            let config: Config = site_app::load_config_with_strings(STRING_KEYS)?;

            assert_eq!(config.weather_api_key.expose_secret(), "abc123");
            assert_eq!(config.weather_api_url, DEFAULT_BASE_URL);
            assert_eq!(config.upstream_query(), UpstreamQuery::default());
            assert_eq!(config.weather_settings().timeout, None);
            assert!(!config.weather_error_status);
            assert_eq!(config.listen_addr.to_string(), "127.0.0.1:3030");
            assert_eq!(config.site_title, site_shell::DEFAULT_TITLE);

            Ok(())
        });
    }

    #[test]
    fn test_missing_key_is_empty() {
        figment::Jail::expect_with(|_jail| {
            let config: Config = site_app::load_config_with_strings(STRING_KEYS)?;

            assert!(!config.has_weather_api_key());

            Ok(())
        });
    }

    #[test]
    fn test_numeric_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WEATHER_API_KEY", "123456");
            jail.set_env("WEATHER_LOCATION", "90210");

            let config: Config = site_app::load_config_with_strings(STRING_KEYS)?;

            assert_eq!(config.weather_api_key.expose_secret(), "123456");
            assert_eq!(config.weather_location, "90210");

            Ok(())
        });
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WEATHER_API_KEY", "0123456789");
            jail.set_env("WEATHER_LOCATION", "02134");
            jail.set_env("SITE_TITLE", "007");

            let config: Config = site_app::load_config_with_strings(STRING_KEYS)?;

            assert_eq!(config.weather_api_key.expose_secret(), "0123456789");
            assert_eq!(config.weather_location, "02134");
            assert_eq!(config.site_title, "007");

            Ok(())
        });
    }

    #[test]
    fn test_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WEATHER_API_KEY", "abc123");
            jail.set_env("WEATHER_API_URL", "http://localhost:9000/current.json");
            jail.set_env("WEATHER_LOCATION", "London");
            jail.set_env("WEATHER_AQI", "true");
            jail.set_env("WEATHER_TIMEOUT_SECS", "5");
            jail.set_env("WEATHER_ERROR_STATUS", "true");
            jail.set_env("LISTEN_ADDR", "0.0.0.0:8080");
            jail.set_env("SITE_TITLE", "Weather");

            let config: Config = site_app::load_config_with_strings(STRING_KEYS)?;

            assert_eq!(
                config.upstream_query(),
                UpstreamQuery {
                    location: "London".to_string(),
                    aqi: true,
                }
            );
            assert_eq!(
                config.weather_settings().base_url,
                "http://localhost:9000/current.json"
            );
            assert_eq!(
                config.weather_settings().timeout,
                Some(Duration::from_secs(5))
            );
            assert!(config.weather_error_status);
            assert_eq!(config.listen_addr.port(), 8080);
            assert_eq!(config.site_title, "Weather");

            Ok(())
        });
    }

    #[test]
    fn test_debug_hides_key() {
        let config = Config {
            weather_api_key: Secret::new("abc123".to_string()),
            ..Config::default()
        };

        assert!(!format!("{config:?}").contains("abc123"));
    }
}
