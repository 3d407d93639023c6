use thiserror::Error;

/// Everything that can end a single weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("API key not found: pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,

    #[error("please provide a city")]
    MissingCity,

    #[error("unknown units '{0}': expected imperial or metric")]
    InvalidUnits(String),

    /// Transport-level failure: DNS, connect, timeout, or reading the body.
    #[error("failed to fetch weather data: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered but signalled failure, either through the HTTP
    /// status or through the `cod` field of the body.
    #[error("failed to retrieve weather data: provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode weather data: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_mentions_api_key() {
        assert!(WeatherError::MissingApiKey.to_string().contains("API key"));
    }

    #[test]
    fn api_error_includes_status_and_message() {
        let err = WeatherError::Api { status: 404, message: "city not found".into() };
        let msg = err.to_string();

        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }
}
