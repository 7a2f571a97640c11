use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rlp_core::DecodeLimits;
use serde::{Deserialize, Serialize};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete codec configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tree decoding limits
    pub limits: LimitsConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum list nesting accepted by tree decoding
    pub max_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level
    pub level: String,
    /// Enable JSON logging
    pub json: bool,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: DecodeLimits::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl From<&LimitsConfig> for DecodeLimits {
    fn from(config: &LimitsConfig) -> Self {
        DecodeLimits {
            max_depth: config.max_depth,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context("Failed to read configuration file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse configuration")?;

        config.validate()?;
        tracing::debug!("Loaded codec configuration from {}", path.display());

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .context("Failed to write configuration file")?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_depth == 0 {
            anyhow::bail!("max_depth must be greater than 0");
        }

        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            anyhow::bail!("Unknown log level: {}", self.log.level);
        }

        Ok(())
    }

    /// Limits to pass to tree decoding
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits::from(&self.limits)
    }
}
