//! Multi-document manifest decoding
//!
//! The manifest is split on `---` document markers while keeping track of the
//! line each document starts on, so a failing document can be reported with
//! a numbered snippet of the lines around the error.

use super::{ManifestError, ManifestResult};
use crate::models::{Resource, ResourceError};
use serde_yaml::Value;

/// Lines shown on each side of the failing line
const SNIPPET_CONTEXT: usize = 3;

/// One YAML document of the manifest
#[derive(Debug)]
struct Document<'a> {
    /// 1-based manifest line of the document's first line
    first_line: usize,
    lines: Vec<&'a str>,
}

impl Document<'_> {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Nothing but blank lines and comments (e.g. helm's `# Source:` header
    /// of a template that rendered to nothing)
    fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        })
    }

    /// Numbered lines around `line` (1-based, relative to the document).
    /// Without a line, the whole document is shown.
    fn snippet(&self, line: Option<usize>) -> String {
        let (start, end) = match line {
            Some(line) => (
                line.saturating_sub(SNIPPET_CONTEXT).max(1),
                (line + SNIPPET_CONTEXT).min(self.lines.len()),
            ),
            None => (1, self.lines.len()),
        };

        let mut snippet = String::new();
        for number in start..=end {
            if let Some(text) = self.lines.get(number - 1) {
                snippet.push_str(&format!("{}. {}\n", number, text));
            }
        }
        snippet
    }
}

fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line.starts_with("--- ")
}

fn split_documents(manifest: &str) -> Vec<Document<'_>> {
    let mut documents = Vec::new();
    let mut current = Document {
        first_line: 1,
        lines: Vec::new(),
    };

    for (idx, line) in manifest.lines().enumerate() {
        if is_separator(line) {
            documents.push(current);
            current = Document {
                first_line: idx + 2,
                lines: Vec::new(),
            };
        } else {
            current.lines.push(line);
        }
    }
    documents.push(current);

    documents.retain(|doc| !doc.is_blank());
    documents
}

/// Decode a multi-document manifest into resources, preserving order.
///
/// Blank, comment-only and null documents are skipped, as are documents
/// without a `kind` (with a warning). Any other decode failure aborts the
/// whole manifest.
pub fn decode_manifest(manifest: &str) -> ManifestResult<Vec<Resource>> {
    let mut resources = Vec::new();

    for (index, document) in split_documents(manifest).iter().enumerate() {
        let text = document.text();

        let value: Value = serde_yaml::from_str(&text)
            .map_err(|e| decode_error(index, document, &e))?;
        if value.is_null() {
            continue;
        }
        if value.get("kind").and_then(Value::as_str).is_none() {
            tracing::warn!(
                "Skipping YAML resource {} at manifest line {}: no kind",
                index,
                document.first_line
            );
            continue;
        }

        let resource = Resource::from_document(&text).map_err(|e| match e {
            ResourceError::Structure(e) => decode_error(index, document, &e),
            ResourceError::Selector(source) => ManifestError::Selector {
                index,
                kind: value
                    .get("kind")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                name: value
                    .get("metadata")
                    .and_then(|m| m.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                source,
            },
        })?;

        tracing::debug!(
            "Found resource: Kind={}, Name={}, Namespace={}",
            resource.kind,
            resource.name(),
            resource.namespace()
        );
        resources.push(resource);
    }

    Ok(resources)
}

fn decode_error(index: usize, document: &Document<'_>, error: &serde_yaml::Error) -> ManifestError {
    let line = error.location().map(|l| l.line());
    ManifestError::Decode {
        index,
        line: document.first_line + line.unwrap_or(1) - 1,
        message: error.to_string(),
        snippet: document.snippet(line),
    }
}
