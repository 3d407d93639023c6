//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The query and decoded response models
//! - The OpenWeatherMap fetcher behind the [`WeatherProvider`] trait
//! - Decoding, icon mapping and one-line formatting
//! - Optional on-disk settings
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod decode;
pub mod error;
pub mod icon;
pub mod model;
pub mod presenter;
pub mod provider;

pub use config::Settings;
pub use error::{Result, WeatherError};
pub use model::{Description, Units, WeatherQuery, WeatherResponse};
pub use presenter::{Style, format_line, render_current};
pub use provider::{OpenWeatherProvider, ProviderOptions, WeatherProvider};
