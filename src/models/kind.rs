//! Kubernetes resource kind definitions
//!
//! The inference engine only understands a fixed set of kinds. Anything else
//! still decodes into a `Resource` (and becomes a graph node), it just never
//! takes part in a relationship rule.

use std::fmt;
use std::str::FromStr;

/// Resource kinds recognised by the relationship rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Deployment,
    StatefulSet,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
}

impl ResourceKind {
    /// Get the manifest `kind` string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Service => "Service",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
        }
    }

    /// Try to parse a string into a ResourceKind, returning None if unknown
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Kinds carrying a pod template (containers and volumes)
    pub fn is_workload(&self) -> bool {
        matches!(self, ResourceKind::Deployment | ResourceKind::StatefulSet)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    // Manifest kinds are case-sensitive, so no aliases here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Service" => Ok(ResourceKind::Service),
            "Deployment" => Ok(ResourceKind::Deployment),
            "StatefulSet" => Ok(ResourceKind::StatefulSet),
            "ConfigMap" => Ok(ResourceKind::ConfigMap),
            "Secret" => Ok(ResourceKind::Secret),
            "PersistentVolumeClaim" => Ok(ResourceKind::PersistentVolumeClaim),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}
