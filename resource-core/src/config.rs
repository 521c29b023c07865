//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (prefix: RESOURCE_, nested keys joined by __)
//! 2. Current working directory: ./resource.toml
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Handler registry behavior
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Handler registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Suppress the warning emitted when two handlers bind the same
    /// (model, anonymity) pair
    #[serde(default = "default_false")]
    pub ignore_duplicate_bindings: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ignore_duplicate_bindings: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, `./resource.toml`, and the
    /// environment
    pub fn load() -> Result<Self> {
        Self::load_from("resource.toml")
    }

    /// Load configuration from a specific TOML file path
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("RESOURCE_").split("__"))
            .extract()?;
        Ok(config)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_false() -> bool {
    false
}
