//! JSON graph export
//!
//! Same nodes and edges as the Cypher script, plus the edge provenance the
//! script format has no room for.

use crate::models::Resource;
use crate::relations::{EdgeProperties, EdgeType, Relationship};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    nodes: Vec<NodeRecord<'a>>,
    edges: Vec<EdgeRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    kind: &'a str,
    name: &'a str,
    namespace: &'a str,
    #[serde(skip_serializing_if = "no_labels")]
    labels: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct NodeRef<'a> {
    kind: &'a str,
    name: &'a str,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: NodeRef<'a>,
    target: NodeRef<'a>,
    #[serde(rename = "type")]
    edge_type: EdgeType,
    properties: &'a EdgeProperties,
}

fn no_labels(labels: &&BTreeMap<String, String>) -> bool {
    labels.is_empty()
}

impl<'a> From<&'a Resource> for NodeRef<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            kind: &resource.kind,
            name: resource.name(),
            namespace: resource.namespace(),
        }
    }
}

/// Generate a pretty-printed `{"nodes": [...], "edges": [...]}` document
pub fn generate(
    resources: &[Resource],
    relationships: &[Relationship<'_>],
) -> serde_json::Result<String> {
    let document = GraphDocument {
        nodes: resources
            .iter()
            .map(|r| NodeRecord {
                kind: &r.kind,
                name: r.name(),
                namespace: r.namespace(),
                labels: r.labels(),
            })
            .collect(),
        edges: relationships
            .iter()
            .map(|rel| EdgeRecord {
                source: rel.source.into(),
                target: rel.target.into(),
                edge_type: rel.edge_type,
                properties: &rel.properties,
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_json_document() {
        let deploy = Resource::new("Deployment", "api", "prod").with_labels([("app", "api")]);
        let config = Resource::new("ConfigMap", "api-config", "prod");
        let resources = vec![deploy, config];
        let rel = Relationship {
            source: &resources[0],
            target: &resources[1],
            edge_type: EdgeType::UsesConfig,
            properties: EdgeProperties::Volume("config".to_string()),
        };

        let output = generate(&resources, &[rel]).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!({
                "nodes": [
                    {"kind": "Deployment", "name": "api", "namespace": "prod", "labels": {"app": "api"}},
                    {"kind": "ConfigMap", "name": "api-config", "namespace": "prod"}
                ],
                "edges": [
                    {
                        "source": {"kind": "Deployment", "name": "api", "namespace": "prod"},
                        "target": {"kind": "ConfigMap", "name": "api-config", "namespace": "prod"},
                        "type": "USES_CONFIG",
                        "properties": {"volume": "config"}
                    }
                ]
            })
        );
    }
}
