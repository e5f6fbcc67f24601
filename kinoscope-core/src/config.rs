use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::cursor::MAX_PAGE_SIZE;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Window size for catalog page queries
    pub page_size: u32,
    /// Category tag selected when the feature starts
    pub default_category: String,
    /// Oldest year offered by the year filter
    pub year_floor: u16,
    /// Substring matched against catalog names when re-deriving a listing
    /// for a named default row; `None` selects the first catalog
    pub preferred_catalog: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            default_category: "movie".to_string(),
            year_floor: 1900,
            preferred_catalog: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Whether the one-shot autostart flow runs at all
    pub autostart: bool,
    /// Manifest locator installed when no providers exist
    pub default_addon_url: String,
    /// Settle delay before the first catalog listing
    pub settle_delay_ms: u64,
    /// Longer settle delay used when an install just happened, giving the
    /// new provider time to register its catalogs
    pub install_settle_delay_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            default_addon_url: "https://v3-cinemeta.strem.io/manifest.json".to_string(),
            settle_delay_ms: 300,
            install_settle_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (KINOSCOPE_DISCOVERY_PAGE_SIZE, etc.)
        builder = builder.add_source(
            Environment::with_prefix("KINOSCOPE")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Validate configuration, collecting every problem rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.discovery.page_size == 0 || self.discovery.page_size > MAX_PAGE_SIZE {
            errors.push(format!(
                "discovery.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.discovery.page_size
            ));
        }
        if self.discovery.default_category.trim().is_empty() {
            errors.push("discovery.default_category must not be empty".to_string());
        }
        if self.discovery.year_floor < 1800 || self.discovery.year_floor > 2100 {
            errors.push(format!(
                "discovery.year_floor must be between 1800 and 2100, got {}",
                self.discovery.year_floor
            ));
        }
        if self.bootstrap.autostart
            && kinoscope_addons::client::base_url_from_locator(&self.bootstrap.default_addon_url)
                .is_err()
        {
            errors.push(format!(
                "bootstrap.default_addon_url is not a valid manifest locator: {}",
                self.bootstrap.default_addon_url
            ));
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            other => errors.push(format!("logging.format must be json or pretty, got {other}")),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
