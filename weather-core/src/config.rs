use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::{ProviderOptions, openweather::DEFAULT_ENDPOINT};

/// Optional settings stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// metric = true
/// emoji = false
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub metric: bool,
    pub emoji: bool,
    pub timeout_secs: u64,
    /// Overrides the provider endpoint, mostly useful for testing.
    pub endpoint: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { api_key: None, metric: false, emoji: true, timeout_secs: 10, endpoint: None }
    }
}

impl Settings {
    /// Load settings from the platform config directory, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load settings from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if settings.timeout_secs == 0 {
            bail!("Invalid config file {}: timeout_secs must be at least 1", path.display());
        }

        Ok(settings)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Stored API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions {
            endpoint: self.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
