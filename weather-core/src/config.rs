use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn/";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DATABASE_FILE: &str = "last_city.db";

/// Unit system requested from the provider.
///
/// The domain model always stores Kelvin; this only tells the mapper how to
/// read the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    pub fn to_kelvin(&self, value: f64) -> f64 {
        match self {
            Units::Metric => value + 273.15,
            Units::Standard => value,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// request_timeout_secs = 10
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub icon_base_url: String,
    /// Location of the last-searched-city database. Defaults to the platform data dir.
    pub database_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub units: Units,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            database_path: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            units: Units::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Database location: explicit setting, else `<data dir>/last_city.db`.
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE)),
        }
    }

    /// API key from the environment, falling back to the config file.
    pub fn resolved_api_key(&self) -> Result<String> {
        let from_env = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        self.api_key_with_override(from_env)
    }

    fn api_key_with_override(&self, env_key: Option<String>) -> Result<String> {
        env_key
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
