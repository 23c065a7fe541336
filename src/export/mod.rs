//! Graph serialisation
//!
//! Turns resources and inferred relationships into text: a Cypher script for
//! Neo4j (default) or a JSON document.

pub mod cypher;
pub mod json;

use crate::models::Resource;
use crate::relations::Relationship;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format of the generated graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Cypher,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Cypher => "cypher",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cypher" => Ok(OutputFormat::Cypher),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {} (expected cypher or json)", s)),
        }
    }
}

/// Render the graph in the requested format
pub fn render(
    format: OutputFormat,
    resources: &[Resource],
    relationships: &[Relationship<'_>],
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Cypher => Ok(cypher::generate(resources, relationships)),
        OutputFormat::Json => json::generate(resources, relationships),
    }
}
