use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::{
    decode::{decode_current, error_message},
    error::{Result, WeatherError},
    model::{WeatherQuery, WeatherResponse},
};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Knobs for the HTTP side of the provider.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

/// Fetches the current conditions from the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(options: ProviderOptions) -> Result<Self> {
        let http = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { endpoint: options.endpoint, http })
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherResponse> {
        debug!(endpoint = %self.endpoint, city = query.city(), units = %query.units(), "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.city()),
                ("appid", query.api_key()),
                ("units", query.units().as_str()),
            ])
            .send()
            .await
            .inspect_err(|e| warn!("OpenWeather request failed: {e}"))?;

        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            warn!(%status, "OpenWeather returned a non-success status");
            return Err(WeatherError::Api { status: status.as_u16(), message: error_message(&body) });
        }

        decode_current(&body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResponse> {
        self.fetch_current(query).await
    }
}
