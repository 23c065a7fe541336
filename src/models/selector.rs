//! Label selector normalisation
//!
//! Manifests encode a selector either as a flat label map (Services) or as a
//! structure wrapping `matchLabels` (Deployments, StatefulSets). Both collapse
//! into one canonical [`Selector`] here.
//!
//! The flat interpretation is always attempted first. A document that happens
//! to decode as a flat string map is accepted as such even if it was written
//! with the structured form in mind.
//!
//! Selectors are read from the document text, like `metadata.labels`, so a
//! plain scalar such as `2` or `true` keeps its source text as the value in
//! both places.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised while normalising a selector
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error(
        "failed to decode selector: expected a map of strings or a struct with matchLabels ({0})"
    )]
    Shape(String),
}

/// Canonical label selector (label key -> value)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selector(BTreeMap<String, String>);

/// Structured selector form, only `matchLabels` takes part in matching
#[derive(Debug, Default, Deserialize)]
struct StructuredSelector {
    #[serde(default, rename = "matchLabels")]
    match_labels: Option<BTreeMap<String, String>>,
}

/// The `spec.selector` node of a manifest document, decoded as `S`
#[derive(Debug, Deserialize)]
struct SelectorDocument<S> {
    #[serde(default)]
    spec: Option<SelectorSpec<S>>,
}

#[derive(Debug, Deserialize)]
struct SelectorSpec<S> {
    #[serde(default)]
    selector: Option<S>,
}

impl<S> SelectorDocument<S> {
    fn into_selector(self) -> Option<S> {
        self.spec.and_then(|spec| spec.selector)
    }
}

impl Selector {
    /// Normalise the `spec.selector` of one manifest document.
    ///
    /// An absent or null selector yields an empty selector. A selector that
    /// decodes as neither shape is an error.
    pub fn from_document(document: &str) -> Result<Self, SelectorError> {
        if let Ok(flat) =
            serde_yaml::from_str::<SelectorDocument<BTreeMap<String, String>>>(document)
        {
            return Ok(Self(flat.into_selector().unwrap_or_default()));
        }

        match serde_yaml::from_str::<SelectorDocument<StructuredSelector>>(document) {
            Ok(structured) => Ok(Self(
                structured
                    .into_selector()
                    .and_then(|s| s.match_labels)
                    .unwrap_or_default(),
            )),
            Err(e) => Err(SelectorError::Shape(e.to_string())),
        }
    }

    /// Subset match against a label set.
    ///
    /// An empty selector selects nothing.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        !self.0.is_empty() && self.0.iter().all(|(k, v)| labels.get(k) == Some(v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selector {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Manifest document whose `spec.selector` is `body` (indented YAML)
    fn with_selector(body: &str) -> String {
        format!("kind: Service\nspec:\n  selector:\n{}", body)
    }

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flat_selector() {
        let doc = with_selector("    app: web\n    tier: frontend\n");
        let selector = Selector::from_document(&doc).unwrap();
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.get("app"), Some("web"));
    }

    #[test]
    fn test_match_labels_selector() {
        let doc = with_selector("    matchLabels:\n      app: web\n    matchExpressions: []\n");
        let selector = Selector::from_document(&doc).unwrap();
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.get("app"), Some("web"));
    }

    #[test]
    fn test_both_shapes_normalise_equal() {
        let flat = Selector::from_document(&with_selector("    app: web\n")).unwrap();
        let structured =
            Selector::from_document(&with_selector("    matchLabels:\n      app: web\n")).unwrap();
        assert_eq!(flat, structured);
    }

    #[test]
    fn test_flat_interpretation_wins() {
        // A string-valued matchLabels key is a perfectly good flat map.
        let selector = Selector::from_document(&with_selector("    matchLabels: web\n")).unwrap();
        assert_eq!(selector.get("matchLabels"), Some("web"));
    }

    #[test]
    fn test_non_string_scalars_keep_their_text() {
        let flat = Selector::from_document(&with_selector("    app: web\n    version: 2\n")).unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("version"), Some("2"));

        let structured = Selector::from_document(&with_selector(
            "    matchLabels:\n      canary: true\n      ratio: 0.50\n",
        ))
        .unwrap();
        assert_eq!(structured.get("canary"), Some("true"));
        assert_eq!(structured.get("ratio"), Some("0.50"));
    }

    #[test]
    fn test_absent_and_null_are_empty() {
        assert!(Selector::from_document("kind: ConfigMap\n").unwrap().is_empty());
        assert!(Selector::from_document("kind: Service\nspec:\n").unwrap().is_empty());
        assert!(
            Selector::from_document("kind: Service\nspec:\n  selector:\n")
                .unwrap()
                .is_empty()
        );
        assert!(
            Selector::from_document("kind: Service\nspec:\n  selector: {}\n")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_structured_without_match_labels_is_empty() {
        let doc = with_selector("    matchExpressions:\n      - key: app\n        operator: Exists\n");
        assert!(Selector::from_document(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_shapes_fail() {
        assert!(matches!(
            Selector::from_document("kind: Service\nspec:\n  selector: just-a-string\n"),
            Err(SelectorError::Shape(_))
        ));
        assert!(Selector::from_document(&with_selector("    - app\n    - web\n")).is_err());
    }

    #[test]
    fn test_subset_match() {
        let selector: Selector = [("app", "x")].into_iter().collect();
        assert!(selector.matches(&labels(&[("app", "x"), ("tier", "y")])));
        assert!(!selector.matches(&labels(&[("app", "z")])));
        assert!(!selector.matches(&labels(&[])));
    }

    #[test]
    fn test_empty_selector_never_matches() {
        let selector = Selector::default();
        assert!(!selector.matches(&labels(&[("app", "x")])));
        assert!(!selector.matches(&labels(&[])));
    }
}
