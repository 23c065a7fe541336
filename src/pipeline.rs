//! End-to-end graph generation
//!
//! manifest source -> decoded resources -> inferred relationships -> script

use crate::export::{self, OutputFormat};
use crate::manifest::{ManifestError, ManifestSource, decode_manifest};
use crate::relations;

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Generated graph text plus what went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOutput {
    pub script: String,
    pub resources: usize,
    pub relationships: usize,
}

/// Load, decode, infer and serialise in one synchronous pass
pub fn generate_graph(
    source: &dyn ManifestSource,
    format: OutputFormat,
) -> Result<GraphOutput, PipelineError> {
    tracing::debug!("Loading manifest from {}", source.describe());
    let manifest = source.load()?;

    let resources = decode_manifest(&manifest)?;
    tracing::info!("Decoded {} resources", resources.len());

    let relationships = relations::infer(&resources);
    for relationship in &relationships {
        tracing::info!("Found relationship: {}", relationship);
    }

    let script = export::render(format, &resources, &relationships)?;

    Ok(GraphOutput {
        script,
        resources: resources.len(),
        relationships: relationships.len(),
    })
}
