//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use crate::export::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Helm binary used to render charts (name on PATH or full path)
    #[serde(default = "default_helm_binary")]
    pub helm_binary: String,

    /// Namespace passed to `helm template` when none is given on the command line
    #[serde(default)]
    pub default_namespace: String,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Values files always passed to `helm template`, before any given on the command line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values_files: Vec<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Script format written when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_helm_binary() -> String {
    "helm".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            helm_binary: default_helm_binary(),
            default_namespace: String::new(),
            output: OutputConfig::default(),
            values_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.helm_binary, "helm");
        assert!(config.default_namespace.is_empty());
        assert_eq!(config.output.format, OutputFormat::Cypher);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("helmBinary: helm"));
        assert!(yaml.contains("format: cypher"));
        assert!(!yaml.contains("valuesFiles"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
helmBinary: /usr/local/bin/helm
defaultNamespace: staging
output:
  format: json
valuesFiles:
  - values-staging.yaml
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.helm_binary, "/usr/local/bin/helm");
        assert_eq!(config.default_namespace, "staging");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.values_files, vec![PathBuf::from("values-staging.yaml")]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("defaultNamespace: prod\n").unwrap();
        assert_eq!(config.helm_binary, "helm");
        assert_eq!(config.default_namespace, "prod");
    }
}
