//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Command line flags (applied by the binary)
//! 2. Environment variable overrides
//! 3. Config file
//! 4. Built-in defaults

use super::{paths, schema::Config};
use crate::export::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file (if any) with environment overrides applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the config file at `path`.
    ///
    /// Fails on YAML syntax errors, invalid value types and an empty helm
    /// binary. A missing file is valid (defaults apply).
    pub fn validate(path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let config = Self::load_file(path)?;
        if config.helm_binary.trim().is_empty() {
            return Err(anyhow::anyhow!("helmBinary must not be empty"));
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        // HELMGRAPH_HELM_BINARY override
        if let Some(binary) = lookup("HELMGRAPH_HELM_BINARY") {
            config.helm_binary = binary;
        }

        // HELMGRAPH_NAMESPACE override
        if let Some(namespace) = lookup("HELMGRAPH_NAMESPACE") {
            config.default_namespace = namespace;
        }

        // HELMGRAPH_FORMAT override
        if let Some(format) = lookup("HELMGRAPH_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring HELMGRAPH_FORMAT: {}", e),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
