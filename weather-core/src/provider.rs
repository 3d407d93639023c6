use async_trait::async_trait;
use std::fmt::Debug;

use crate::{WeatherQuery, WeatherResponse, error::Result};

pub mod openweather;

pub use openweather::{OpenWeatherProvider, ProviderOptions};

/// Source of current weather for a query.
///
/// The presenter takes this as an injected capability so tests can swap in a
/// fake without touching the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResponse>;
}
