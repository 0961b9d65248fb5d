//! Configuration loading and management

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Runtime mode selecting diagnostic behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Production => "noteful=info",
            Environment::Development => "noteful=debug,tower_http=debug",
            Environment::Test => "noteful=warn",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

/// File-backed configuration for the API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path prefix every resource route is nested under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,

    /// Connection pool settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
        }
    }
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_prefix: default_api_prefix(),
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional JSON file
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let Some(config_file) = config_file else {
            tracing::info!("No config file given, using defaults");
            return Ok(Config::default());
        };

        if !config_file.exists() {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_file
            );
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;
        tracing::info!("Loaded configuration from {:?}", config_file);
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        config.api_prefix = normalize_prefix(&config.api_prefix);
        Ok(config)
    }
}

/// Ensure a leading slash and no trailing slash. `""` and `"/"` mean no prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
