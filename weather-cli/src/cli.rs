use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use weather_core::{
    OpenWeatherProvider, Settings, Units, WeatherError, WeatherQuery, render_current,
};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Print the current weather for a city")]
pub struct Cli {
    /// City name, e.g. "London" or "São Paulo,BR".
    pub city: String,

    /// Use Celsius instead of Fahrenheit.
    #[arg(short, long)]
    pub metric: bool,

    /// Unit system: imperial or metric.
    #[arg(short, long, value_name = "UNITS", value_parser = parse_units, conflicts_with = "metric")]
    pub units: Option<Units>,

    /// OpenWeatherMap API key; falls back to OPENWEATHER_API_KEY.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Do not print the weather glyph.
    #[arg(short, long)]
    pub no_emoji: bool,

    /// Request timeout in seconds.
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to a settings file; defaults to the platform config directory.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Provider endpoint override.
    #[arg(long, value_name = "URL", hide = true)]
    pub endpoint: Option<String>,
}

fn parse_units(value: &str) -> Result<Units, WeatherError> {
    Units::try_from(value)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.load_settings()?;
        let env_key = std::env::var(API_KEY_ENV).ok();
        let query = self.query(env_key.as_deref(), &settings)?;

        let mut options = settings.provider_options();
        if let Some(endpoint) = &self.endpoint {
            options.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout {
            options.timeout = Duration::from_secs(secs);
        }
        debug!(?options, "provider options resolved");

        let provider = OpenWeatherProvider::new(options)?;
        let emoji = settings.emoji && !self.no_emoji;

        let line = render_current(&provider, &query, emoji).await?;
        println!("{line}");

        Ok(())
    }

    fn load_settings(&self) -> anyhow::Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
        .context("failed to load settings")
    }

    /// Builds the query. The key is taken from the flag, then the
    /// environment, then the settings file; blank values are skipped.
    fn query(&self, env_key: Option<&str>, settings: &Settings) -> anyhow::Result<WeatherQuery> {
        let api_key = [self.api_key.as_deref(), env_key]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|k| !k.is_empty())
            .or_else(|| settings.api_key())
            .ok_or(WeatherError::MissingApiKey)?;

        let units = self
            .units
            .unwrap_or_else(|| Units::from_metric_flag(self.metric || settings.metric));

        Ok(WeatherQuery::new(api_key, &self.city, units)?)
    }
}
