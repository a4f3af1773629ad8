//! Configuration management for rategate.

use serde::{Deserialize, Serialize};

use crate::store::StorageType;

/// Main configuration for the rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RategateConfig {
    /// Whether limiting is applied at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Prefix of the limiter key name portion
    #[serde(default)]
    pub name_prefix: String,

    /// Suffix of the limiter key name portion
    #[serde(default)]
    pub name_suffix: String,

    /// Raise a rate-limited error on denial instead of delegating
    /// to the denial handler
    #[serde(default = "default_throws_exception")]
    pub throws_exception: bool,

    /// Redirect target for denied browser-style callers
    #[serde(default)]
    pub denied_html_url: Option<String>,

    /// Redirect target for denied programmatic callers
    #[serde(default)]
    pub denied_rest_url: Option<String>,

    /// Storage backend configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for RategateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            name_prefix: String::new(),
            name_suffix: String::new(),
            throws_exception: default_throws_exception(),
            denied_html_url: None,
            denied_rest_url: None,
            storage: StorageConfig::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_throws_exception() -> bool {
    true
}

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend holds the window records
    #[serde(default)]
    pub storage_type: StorageType,

    /// Redis connection URL, used when the backend is `redis`
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::default(),
            redis_url: default_redis_url(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1/".to_string()
}

impl RategateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RategateConfig = serde_yaml::from_str(&contents)
            .map_err(|e| crate::error::RategateError::Config(e.to_string()))?;
        Ok(config)
    }
}
