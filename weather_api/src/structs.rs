use serde::Serialize;
use site_app::AppError;
use site_shell::SiteHead;

use crate::config::Config;
use crate::weatherapi::{UpstreamQuery, WeatherClient};

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub weather: WeatherClient,
    pub query: UpstreamQuery,
    pub site_head: SiteHead,
}

impl site_app::ContextProvider<Config> for AppContext {
    const STRING_KEYS: &'static [&'static str] = crate::config::STRING_KEYS;

    async fn new(config: Config) -> Result<Self, AppError> {
        if !config.has_weather_api_key() {
            tracing::warn!(
                "WEATHER_API_KEY is not set, upstream requests will be rejected"
            );
        }

        let weather = WeatherClient::new(&config.weather_settings())
            .map_err(|e| AppError::Context(e.to_string()))?;

        Ok(Self {
            weather,
            query: config.upstream_query(),
            site_head: SiteHead::new(config.site_title.clone()),
            config,
        })
    }
}

/// Body returned in place of the weather payload when the upstream call
/// fails.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
