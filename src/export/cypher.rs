//! Cypher script generation
//!
//! The statement forms below are consumed by downstream Neo4j imports, so the
//! punctuation and ordering are kept stable: constraints (one per kind, in
//! first-seen order), then node upserts, then edges. Values are written as-is,
//! without escaping.

use crate::models::Resource;
use crate::relations::Relationship;
use std::collections::HashSet;

/// Uniqueness constraint on (name, namespace) for one node label
pub fn constraint_statement(kind: &str) -> String {
    format!(
        "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE (n.name, n.namespace) IS UNIQUE;",
        kind
    )
}

/// Upsert of one resource node
pub fn node_statement(resource: &Resource) -> String {
    format!(
        "MERGE (:{} {{name: '{}', namespace: '{}', kind: '{}'}});",
        resource.kind,
        resource.name(),
        resource.namespace(),
        resource.kind
    )
}

/// Match both endpoints by kind and name, then connect them
pub fn edge_statement(relationship: &Relationship<'_>) -> String {
    format!(
        "MATCH (a:{} {{name: '{}'}}), (b:{} {{name: '{}'}}) MERGE (a)-[:{}]->(b);",
        relationship.source.kind,
        relationship.source.name(),
        relationship.target.kind,
        relationship.target.name(),
        relationship.edge_type
    )
}

/// Generate the full script, one newline-terminated statement per line
pub fn generate(resources: &[Resource], relationships: &[Relationship<'_>]) -> String {
    let mut script = String::new();

    let mut seen_kinds = HashSet::new();
    for resource in resources {
        if seen_kinds.insert(resource.kind.as_str()) {
            script.push_str(&constraint_statement(&resource.kind));
            script.push('\n');
        }
    }

    for resource in resources {
        script.push_str(&node_statement(resource));
        script.push('\n');
    }

    for relationship in relationships {
        script.push_str(&edge_statement(relationship));
        script.push('\n');
    }

    script
}
