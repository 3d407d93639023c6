//! Decoding of the provider's current-weather JSON document.

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    icon::IconCode,
    model::{Description, WeatherResponse},
};

/// `cod` arrives as a number on success and as a string on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Num(u16),
    Text(String),
}

impl OwCode {
    fn status(&self) -> Result<u16> {
        match self {
            OwCode::Num(n) => Ok(*n),
            OwCode::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| WeatherError::Decode(format!("invalid status code '{s}'"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    description: String,
    icon: Option<String>,
    id: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    cod: Option<OwCode>,
    message: Option<String>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

/// Error document the provider sends with non-200 statuses.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

/// Decodes a current-weather body.
///
/// The body is read as a stream of JSON values and the last one is used.
/// A body-level `cod` other than 200 is reported as [`WeatherError::Api`].
pub fn decode_current(body: &str) -> Result<WeatherResponse> {
    let mut last = None;
    for value in serde_json::Deserializer::from_str(body).into_iter::<OwCurrentResponse>() {
        last = Some(value.map_err(|e| WeatherError::Decode(e.to_string()))?);
    }
    let parsed = last.ok_or_else(|| WeatherError::Decode("empty response body".into()))?;

    let status_code = match &parsed.cod {
        Some(code) => code.status()?,
        None => 200,
    };
    if status_code != 200 {
        return Err(WeatherError::Api {
            status: status_code,
            message: parsed.message.unwrap_or_else(|| "no message".to_string()),
        });
    }

    let main = parsed
        .main
        .ok_or_else(|| WeatherError::Decode("missing field `main.temp`".into()))?;

    let descriptions: Vec<Description> = parsed
        .weather
        .into_iter()
        .map(|w| Description {
            text: w.description,
            icon: w.icon.map(IconCode::Icon).or(w.id.map(IconCode::Condition)),
        })
        .collect();

    debug!(temperature = main.temp, descriptions = descriptions.len(), "decoded weather");

    Ok(WeatherResponse { status_code, temperature: main.temp, descriptions })
}

/// Best-effort extraction of a human message from an error body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
