use anyhow::{Context, Result, anyhow};
use chrono::Locale;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{error::ConfigError, model::DEFAULT_FORECAST_DAYS};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOCALE: &str = "en_US";

const MAX_FORECAST_DAYS: u8 = 14;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// locale = "en_US"
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub forecast_days: u8,
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            forecast_days: DEFAULT_FORECAST_DAYS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key_present", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_days", &self.forecast_days)
            .field("locale", &self.locale)
            .finish()
    }
}

/// Fully validated settings the provider and presentation layers run with.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub forecast_days: u8,
    pub locale: Locale,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("forecast_days", &self.forecast_days)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load config from the platform location, or an empty default on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Resolve using `WEATHERAPI_KEY` from the process environment.
    pub fn resolve_from_env(&self) -> Result<Settings, ConfigError> {
        self.resolve(std::env::var(API_KEY_ENV).ok())
    }

    /// Validate the config. A non-blank `env_api_key` wins over the file key.
    pub fn resolve(&self, env_api_key: Option<String>) -> Result<Settings, ConfigError> {
        let api_key = non_blank(env_api_key)
            .or_else(|| non_blank(self.api_key.clone()))
            .ok_or(ConfigError::MissingApiKey)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if !(1..=MAX_FORECAST_DAYS).contains(&self.forecast_days) {
            return Err(ConfigError::InvalidForecastDays(self.forecast_days));
        }

        let locale = Locale::try_from(self.locale.as_str())
            .map_err(|_| ConfigError::UnknownLocale(self.locale.clone()))?;

        Ok(Settings {
            api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            forecast_days: self.forecast_days,
            locale,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_config_error() {
        let cfg = Config::default();
        let err = cfg.resolve(None).unwrap_err();

        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        let err = cfg.resolve(Some(String::new())).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let settings = cfg.resolve(Some("ENV_KEY".into())).expect("settings");
        assert_eq!(settings.api_key, "ENV_KEY");

        let settings = cfg.resolve(None).expect("settings");
        assert_eq!(settings.api_key, "FILE_KEY");
    }

    #[test]
    fn defaults_resolve_to_weatherapi() {
        let settings = Config::default().resolve(Some("KEY".into())).expect("settings");

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.forecast_days, 3);
        assert_eq!(settings.locale, Locale::en_US);
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = Config { timeout_secs: 0, ..Config::default() };
        assert_eq!(cfg.resolve(Some("K".into())).unwrap_err(), ConfigError::InvalidTimeout);

        let cfg = Config { forecast_days: 0, ..Config::default() };
        assert_eq!(
            cfg.resolve(Some("K".into())).unwrap_err(),
            ConfigError::InvalidForecastDays(0)
        );

        let cfg = Config { locale: "xx_NOPE".into(), ..Config::default() };
        assert!(matches!(
            cfg.resolve(Some("K".into())).unwrap_err(),
            ConfigError::UnknownLocale(_)
        ));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("api_key = \"abc\"\nlocale = \"fr_FR\"").expect("parse");

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.locale, "fr_FR");
    }

    #[test]
    fn debug_output_hides_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".into());

        let printed = format!("{cfg:?}");
        assert!(!printed.contains("SECRET"));

        let settings = cfg.resolve(None).expect("settings");
        assert!(!format!("{settings:?}").contains("SECRET"));
    }
}
