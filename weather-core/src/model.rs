use std::fmt;

use crate::{
    error::{Result, WeatherError},
    icon::{self, IconCode},
};

/// Temperature unit system understood by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Value sent as the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Units::Imperial => 'F',
            Units::Metric => 'C',
        }
    }

    pub fn from_metric_flag(metric: bool) -> Self {
        if metric { Units::Metric } else { Units::Imperial }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            _ => Err(WeatherError::InvalidUnits(value.to_string())),
        }
    }
}

/// Parameters of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    api_key: String,
    city: String,
    units: Units,
}

impl WeatherQuery {
    /// Builds a query, rejecting a blank key or city.
    ///
    /// The city is kept unescaped; it is percent-encoded when the request
    /// URL is built.
    pub fn new(api_key: impl Into<String>, city: &str, units: Units) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::MissingCity);
        }

        Ok(Self { api_key, city: city.to_owned(), units })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn units(&self) -> Units {
        self.units
    }
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub text: String,
    pub icon: Option<IconCode>,
}

/// Decoded current-weather payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResponse {
    pub status_code: u16,
    pub temperature: f64,
    pub descriptions: Vec<Description>,
}

impl WeatherResponse {
    /// Text of the first description, or `""` when the provider sent none.
    pub fn description(&self) -> &str {
        self.descriptions.first().map(|d| d.text.as_str()).unwrap_or("")
    }

    pub fn glyph(&self) -> &'static str {
        self.descriptions
            .first()
            .and_then(|d| d.icon.as_ref())
            .map(IconCode::glyph)
            .unwrap_or(icon::UNKNOWN_GLYPH)
    }
}
