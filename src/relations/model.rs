//! Relationship data structures

use crate::models::{Resource, Selector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Why two resources are related
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeType {
    /// Service selects a Deployment through its label selector
    Selects,
    /// Workload consumes a ConfigMap (volume, envFrom or env key)
    UsesConfig,
    /// Workload consumes a Secret (volume, envFrom or env key)
    UsesSecret,
    /// StatefulSet claim template names an existing PersistentVolumeClaim
    UsesPvc,
}

impl EdgeType {
    /// Relationship label as written to the graph
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Selects => "SELECTS",
            EdgeType::UsesConfig => "USES_CONFIG",
            EdgeType::UsesSecret => "USES_SECRET",
            EdgeType::UsesPvc => "USES_PVC",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EdgeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Provenance of an edge: which field produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeProperties {
    /// No provenance recorded (claim template matches)
    None,
    /// The full selector that matched
    SelectorLabels(Selector),
    /// Name of the pod volume referencing the target
    Volume(String),
    /// Name of the environment variable sourced from the target
    EnvVar(String),
    /// Every key of the target is imported through `envFrom`
    BulkImport,
}

impl Serialize for EdgeProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if matches!(self, EdgeProperties::None) { 0 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        match self {
            EdgeProperties::None => {}
            EdgeProperties::SelectorLabels(selector) => {
                map.serialize_entry("selector_labels", selector)?
            }
            EdgeProperties::Volume(name) => map.serialize_entry("volume", name)?,
            EdgeProperties::EnvVar(name) => map.serialize_entry("env_var_name", name)?,
            EdgeProperties::BulkImport => map.serialize_entry("envFrom", &true)?,
        }
        map.end()
    }
}

/// A directed edge between two resources of the same input set
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship<'a> {
    pub source: &'a Resource,
    pub target: &'a Resource,
    pub edge_type: EdgeType,
    pub properties: EdgeProperties,
}

impl fmt::Display for Relationship<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} --[{}]--> {}/{}",
            self.source.kind,
            self.source.name(),
            self.edge_type,
            self.target.kind,
            self.target.name()
        )
    }
}
