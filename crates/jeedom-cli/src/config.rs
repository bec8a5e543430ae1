//! Configuration file handling for jeedom-cli

use anyhow::{Context, Result};
use jeedom_client::ConfigOverrides;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the CLI tool
///
/// ```toml
/// output = "json"
///
/// [client]
/// base_url = "http://192.168.1.10"
/// api_key = "..."
///
/// [client.request_options.headers]
/// "User-Agent" = "my-box"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Client settings, merged over the library defaults
    pub client: ConfigOverrides,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("jeedom-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        url: Option<&str>,
        api_key: Option<&str>,
        output: Option<&str>,
        no_color: bool,
    ) -> MergedConfig {
        let mut client = self.client.clone();
        if let Some(url) = url {
            client = client.base_url(url);
        }
        if let Some(api_key) = api_key {
            client = client.api_key(api_key);
        }

        MergedConfig {
            client,
            output: output
                .map(String::from)
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| "table".to_string()),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub client: ConfigOverrides,
    pub output: String,
    pub no_color: bool,
}
