//! helmgraph library
//!
//! Converts the rendered manifests of a Helm chart into a graph of Kubernetes
//! resources and the relationships between them, ready to load into Neo4j.
//! It can be used both as a binary and as a library for testing.

pub mod config;
pub mod export;
pub mod manifest;
pub mod models;
pub mod pipeline;
pub mod relations;

// Re-export commonly used types for convenience
pub use export::OutputFormat;
pub use manifest::{ManifestError, ManifestSource, decode_manifest};
pub use models::{Resource, ResourceKind, Selector};
pub use pipeline::{GraphOutput, PipelineError, generate_graph};
pub use relations::{EdgeProperties, EdgeType, Relationship, infer};
