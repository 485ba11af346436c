//! Configuration management for SymbolicBot.
//!
//! Loads settings from a TOML file or falls back to defaults. Every field
//! carries a serde default so partial files are valid.

use crate::lexicon::{Lexicon, DEFAULT_EXCLUDED_WORDS, DEFAULT_TRIGGERS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment override for the config file location
pub const CONFIG_ENV: &str = "SYMBOT_CONFIG";

/// Encyclopedia endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki action API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Prefix for canonical article links
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// License attached to encyclopedia answers
    #[serde(default = "default_license_url")]
    pub license_url: String,

    /// Requested thumbnail width in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extract substring that marks a multi-sense page
    #[serde(default = "default_disambiguation_marker")]
    pub disambiguation_marker: String,
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_page_url() -> String {
    "https://en.wikipedia.org/wiki/".to_string()
}

fn default_license_url() -> String {
    "https://creativecommons.org/licenses/by-sa/4.0/".to_string()
}

fn default_thumbnail_size() -> u32 {
    500
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("SymbolicBot/{}", env!("CARGO_PKG_VERSION"))
}

fn default_disambiguation_marker() -> String {
    "may refer to:".to_string()
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_url: default_page_url(),
            license_url: default_license_url(),
            thumbnail_size: default_thumbnail_size(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            disambiguation_marker: default_disambiguation_marker(),
        }
    }
}

/// Canned-reply dataset location. Unset means the dataset bundled with
/// the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Trigger phrases and stop-words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,

    #[serde(default = "default_excluded_words")]
    pub excluded_words: Vec<String>,
}

fn default_triggers() -> Vec<String> {
    DEFAULT_TRIGGERS.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_words() -> Vec<String> {
    DEFAULT_EXCLUDED_WORDS.iter().map(|s| s.to_string()).collect()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            triggers: default_triggers(),
            excluded_words: default_excluded_words(),
        }
    }
}

impl LexiconConfig {
    pub fn build(&self) -> Lexicon {
        Lexicon::new(&self.triggers, &self.excluded_words)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wiki: WikiConfig,

    #[serde(default)]
    pub responses: ResponsesConfig,

    #[serde(default)]
    pub lexicon: LexiconConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Default config location: $SYMBOT_CONFIG, then the XDG config dir
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("symbot").join("config.toml"))
    }

    /// Load an explicitly requested file, or the default one with fallback.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                warn!("Config not found at {:?}, using defaults", path);
                Ok(Config::default())
            }
            None => {
                warn!("No config directory available, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Render as TOML (for `symbotctl config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
