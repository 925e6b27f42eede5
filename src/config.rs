//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_URL_BASE};
use crate::models::{color_set, ColorSet, ColorSlot};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding the company and stylesheet store
    pub store_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let store_dir = Config::config_dir()
            .map(|dir| dir.join("store"))
            .unwrap_or_else(|_| PathBuf::from(".company-colors"));

        Self { store_dir }
    }
}

/// Stylesheet publishing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Static base path that generated stylesheet URLs start with
    #[serde(default = "default_url_base")]
    pub url_base: String,
}

fn default_url_base() -> String {
    DEFAULT_URL_BASE.to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            url_base: default_url_base(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/CompanyColors/config.toml`
/// - macOS: `~/Library/Application Support/CompanyColors/config.toml`
/// - Windows: `%APPDATA%\CompanyColors\config.toml`
///
/// `COMPANY_COLORS_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `url_base` must start and end with `/`
/// - `defaults` keys must be color slot names, values empty or hex colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Publishing settings
    #[serde(default)]
    pub publish: PublishConfig,
    /// Slot values restored when a logo is removed; missing slots are empty
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `COMPANY_COLORS_CONFIG_DIR` when set, otherwise the platform
    /// config directory joined with `CompanyColors`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config = Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let base = &self.publish.url_base;
        if !base.starts_with('/') || !base.ends_with('/') {
            anyhow::bail!("Publish url_base must start and end with '/': '{base}'");
        }

        for key in self.defaults.keys() {
            if ColorSlot::from_key(key).is_none() {
                anyhow::bail!("Unknown color slot in [defaults]: '{key}'");
            }
        }
        color_set::validate_entries(
            self.defaults
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .context("Invalid [defaults] color")?;

        Ok(())
    }

    /// The defaults table as a full slot mapping.
    ///
    /// Every slot is present; slots without a configured default map to `""`.
    #[must_use]
    pub fn default_slot_values(&self) -> BTreeMap<String, String> {
        ColorSlot::ALL
            .iter()
            .map(|slot| {
                let value = self.defaults.get(slot.key()).cloned().unwrap_or_default();
                (slot.key().to_string(), value)
            })
            .collect()
    }

    /// The defaults table as a color set (empty values dropped).
    #[must_use]
    pub fn default_colors(&self) -> ColorSet {
        ColorSet::from_entries(self.default_slot_values())
    }
}
