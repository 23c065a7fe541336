//! Manifest materialisation and decoding
//!
//! `render` produces the multi-document manifest text (by running
//! `helm template`, or by reading a pre-rendered file), `decode` turns that
//! text into the ordered resource sequence the inference engine consumes.

pub mod decode;
pub mod render;

pub use decode::decode_manifest;
pub use render::{HelmTemplate, ManifestFile, ManifestSource, RenderRequest};

use crate::models::SelectorError;

/// Manifest errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("{binary} binary not found in PATH")]
    HelmNotFound { binary: String },

    #[error("failed to run helm template: {status}\n{output}")]
    Render { status: String, output: String },

    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "error decoding YAML resource {index} (manifest line {line}): {message}\n\nManifest:\n{snippet}"
    )]
    Decode {
        index: usize,
        line: usize,
        message: String,
        snippet: String,
    },

    #[error("error decoding selector of YAML resource {index} ({kind} {name}): {source}")]
    Selector {
        index: usize,
        kind: String,
        name: String,
        #[source]
        source: SelectorError,
    },
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;
