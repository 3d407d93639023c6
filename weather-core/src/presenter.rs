//! Turns a decoded response into the single line the CLI prints.

use tracing::debug;

use crate::{
    error::Result,
    model::{Units, WeatherQuery, WeatherResponse},
    provider::WeatherProvider,
};

/// Output options for [`format_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub units: Units,
    pub emoji: bool,
}

/// `68.0°F [ ☀️ sunny ]` with emoji, `68.0°F (sunny)` without.
pub fn format_line(response: &WeatherResponse, style: Style) -> String {
    let temperature = format!("{:.1}°{}", response.temperature, style.units.symbol());
    let description = response.description();

    match (style.emoji, description.is_empty()) {
        (true, false) => format!("{temperature} [ {} {description} ]", response.glyph()),
        (true, true) => format!("{temperature} [ {} ]", response.glyph()),
        (false, false) => format!("{temperature} ({description})"),
        (false, true) => temperature,
    }
}

/// Fetches the current weather through `provider` and formats it.
pub async fn render_current(
    provider: &dyn WeatherProvider,
    query: &WeatherQuery,
    emoji: bool,
) -> Result<String> {
    let response = provider.current_weather(query).await?;
    debug!(city = query.city(), "rendering weather line");

    Ok(format_line(&response, Style { units: query.units(), emoji }))
}
