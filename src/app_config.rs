use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::file_utils::FileManager;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language name or ISO code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Premium (keyed) provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PremiumConfig {
    // @field: Allow the premium provider at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: API key; empty disables the premium provider
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL; empty selects by key type
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Secondary (keyless) provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SecondaryConfig {
    // @field: Service URL
    #[serde(default = "default_secondary_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_secondary_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Premium provider, tried first when a key is present
    #[serde(default)]
    pub premium: PremiumConfig,

    /// Secondary provider, always available
    #[serde(default)]
    pub secondary: SecondaryConfig,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Tries per provider before falling through
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff before the second try, doubled on each further try (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "slovenian".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3 // Default to 3 tries per provider
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_true() -> bool {
    true
}

fn default_secondary_endpoint() -> String {
    crate::providers::google::DEFAULT_ENDPOINT.to_string()
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load a configuration file, writing the defaults first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Self::load(path);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &config_json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let target = self.target_language.trim();
        if target.is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        if !language_utils::is_supported_language(target)
            && language_utils::validate_language_code(target).is_err()
        {
            return Err(anyhow!(
                "Unknown target language '{}'. Supported: {}",
                target,
                language_utils::supported_language_names()
            ));
        }

        if self.translation.common.retry_count == 0 {
            return Err(anyhow!("retry_count must be at least 1"));
        }

        if !self.translation.premium.endpoint.is_empty() {
            Url::parse(&self.translation.premium.endpoint)
                .with_context(|| format!("Invalid premium endpoint: {}", self.translation.premium.endpoint))?;
        }

        Url::parse(&self.translation.secondary.endpoint)
            .with_context(|| format!("Invalid secondary endpoint: {}", self.translation.secondary.endpoint))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// The premium key, when the premium provider should be used
    pub fn premium_api_key(&self) -> Option<&str> {
        let key = self.premium.api_key.trim();
        if self.premium.enabled && !key.is_empty() {
            Some(key)
        } else {
            None
        }
    }

    /// Base backoff between tries
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.common.retry_backoff_ms)
    }
}
