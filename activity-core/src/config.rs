use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const DEFAULT_ENDPOINT: &str = "http://api.weatherstack.com/current";

pub const ACCESS_KEY_ENV: &str = "WEATHERSTACK_ACCESS_KEY";
pub const ENDPOINT_ENV: &str = "WEATHERSTACK_ENDPOINT";

/// Settings for the Weatherstack provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WeatherstackConfig {
    pub access_key: Option<String>,

    /// Overrides [`DEFAULT_ENDPOINT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout; no timeout when absent or zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weatherstack]
/// access_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub weatherstack: WeatherstackConfig,
}

impl Config {
    /// Load config from disk, or an empty default if the file doesn't exist yet,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(env::var(ACCESS_KEY_ENV).ok(), env::var(ENDPOINT_ENV).ok());
        Ok(cfg)
    }

    /// Load config from disk only, without environment overrides.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
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

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "activity-advisor", "activity")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Non-empty values win over whatever the file held.
    pub fn apply_overrides(&mut self, access_key: Option<String>, endpoint: Option<String>) {
        if let Some(key) = access_key.filter(|k| !k.trim().is_empty()) {
            self.weatherstack.access_key = Some(key);
        }
        if let Some(url) = endpoint.filter(|u| !u.trim().is_empty()) {
            self.weatherstack.endpoint = Some(url);
        }
    }

    pub fn set_access_key(&mut self, access_key: String) {
        self.weatherstack.access_key = Some(access_key);
    }

    /// Returns the access key, or an error telling the user how to provide one.
    pub fn access_key(&self) -> Result<&str> {
        self.weatherstack.access_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No Weatherstack access key configured.\n\
                 Hint: run `activity configure` or set {ACCESS_KEY_ENV}."
            )
        })
    }

    pub fn endpoint(&self) -> &str {
        self.weatherstack.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// `timeout_secs = 0` means no timeout, same as leaving it out.
    pub fn timeout(&self) -> Option<Duration> {
        self.weatherstack.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}
