//! Configuration system for helmgraph
//!
//! A single YAML file in the config directory, layered over built-in
//! defaults and under environment variable overrides.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, OutputConfig};

use std::path::PathBuf;

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "helmBinary" => Ok(config.helm_binary.clone()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "output.format" => Ok(config.output.format.to_string()),
        "valuesFiles" => Ok(config
            .values_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",")),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "helmBinary" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("helmBinary must not be empty"));
            }
            config.helm_binary = value.to_string();
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "output.format" => {
            config.output.format = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "valuesFiles" => {
            // Comma-separated list, empty clears
            config.values_files = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
