//! Mapping from provider condition codes to display glyphs.

/// Shown for codes the tables below do not know.
pub const UNKNOWN_GLYPH: &str = "❔";

/// Condition code attached to a weather description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconCode {
    /// Icon identifier such as `"01d"` or `"50n"`.
    Icon(String),
    /// Numeric condition id such as `800`.
    Condition(u16),
}

impl IconCode {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCode::Icon(code) => glyph_for_icon(code),
            IconCode::Condition(id) => glyph_for_condition(*id),
        }
    }
}

pub fn glyph_for_icon(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => UNKNOWN_GLYPH,
    }
}

pub fn glyph_for_condition(id: u16) -> &'static str {
    match id {
        200..=299 => "⛈️",
        300..=399 => "🌦️",
        500..=599 => "🌧️",
        600..=699 => "❄️",
        700..=799 => "🌫️",
        800 => "☀️",
        801..=899 => "☁️",
        _ => UNKNOWN_GLYPH,
    }
}
