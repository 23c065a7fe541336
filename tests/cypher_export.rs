//! Cypher export tests
//!
//! The script text is a compatibility surface for Neo4j imports, so the full
//! output is pinned with insta snapshots.
//! Run `cargo insta review` to review and accept snapshot changes.

use helmgraph::export::cypher;
use helmgraph::models::{Resource, Volume};
use helmgraph::{EdgeProperties, EdgeType, Relationship, decode_manifest, infer};
use insta::assert_snapshot;

#[test]
fn test_generate_service_and_deployment() {
    let resources = vec![
        Resource::new("Service", "my-service", "default"),
        Resource::new("Deployment", "my-deployment", "default"),
    ];
    let relationships = vec![Relationship {
        source: &resources[0],
        target: &resources[1],
        edge_type: EdgeType::Selects,
        properties: EdgeProperties::None,
    }];

    let script = cypher::generate(&resources, &relationships);
    assert_snapshot!(script, @r"
    CREATE CONSTRAINT IF NOT EXISTS FOR (n:Service) REQUIRE (n.name, n.namespace) IS UNIQUE;
    CREATE CONSTRAINT IF NOT EXISTS FOR (n:Deployment) REQUIRE (n.name, n.namespace) IS UNIQUE;
    MERGE (:Service {name: 'my-service', namespace: 'default', kind: 'Service'});
    MERGE (:Deployment {name: 'my-deployment', namespace: 'default', kind: 'Deployment'});
    MATCH (a:Service {name: 'my-service'}), (b:Deployment {name: 'my-deployment'}) MERGE (a)-[:SELECTS]->(b);
    ");
}

#[test]
fn test_constraints_once_per_kind_first_seen() {
    let resources = vec![
        Resource::new("Secret", "s1", "default"),
        Resource::new("ConfigMap", "c1", "default"),
        Resource::new("Secret", "s2", "default"),
        Resource::new("ConfigMap", "c2", "default"),
    ];
    let script = cypher::generate(&resources, &[]);
    let constraints: Vec<&str> = script
        .lines()
        .filter(|line| line.starts_with("CREATE CONSTRAINT"))
        .collect();
    assert_eq!(
        constraints,
        vec![
            cypher::constraint_statement("Secret"),
            cypher::constraint_statement("ConfigMap"),
        ]
    );
    assert_eq!(script.lines().filter(|l| l.starts_with("MERGE")).count(), 4);
}

#[test]
fn test_edges_follow_inference_order() {
    let resources = vec![
        Resource::new("Deployment", "api", "prod")
            .with_labels([("app", "api")])
            .with_volume(Volume::from_config_map("config", "api-config"))
            .with_volume(Volume::from_secret("tls", "api-tls")),
        Resource::new("ConfigMap", "api-config", "prod"),
        Resource::new("Secret", "api-tls", "prod"),
    ];
    let relationships = infer(&resources);

    let script = cypher::generate(&resources, &relationships);
    assert_snapshot!(script, @r"
    CREATE CONSTRAINT IF NOT EXISTS FOR (n:Deployment) REQUIRE (n.name, n.namespace) IS UNIQUE;
    CREATE CONSTRAINT IF NOT EXISTS FOR (n:ConfigMap) REQUIRE (n.name, n.namespace) IS UNIQUE;
    CREATE CONSTRAINT IF NOT EXISTS FOR (n:Secret) REQUIRE (n.name, n.namespace) IS UNIQUE;
    MERGE (:Deployment {name: 'api', namespace: 'prod', kind: 'Deployment'});
    MERGE (:ConfigMap {name: 'api-config', namespace: 'prod', kind: 'ConfigMap'});
    MERGE (:Secret {name: 'api-tls', namespace: 'prod', kind: 'Secret'});
    MATCH (a:Deployment {name: 'api'}), (b:ConfigMap {name: 'api-config'}) MERGE (a)-[:USES_CONFIG]->(b);
    MATCH (a:Deployment {name: 'api'}), (b:Secret {name: 'api-tls'}) MERGE (a)-[:USES_SECRET]->(b);
    ");
}

#[test]
fn test_every_edge_endpoint_has_a_node_statement() {
    let manifest = r#"
kind: StatefulSet
metadata:
  name: db
  namespace: data
spec:
  volumeClaimTemplates:
    - metadata:
        name: pvc1
---
kind: PersistentVolumeClaim
metadata:
  name: pvc1
  namespace: data
"#;
    let resources = decode_manifest(manifest).unwrap();
    let relationships = infer(&resources);
    assert_eq!(relationships.len(), 1);

    let script = cypher::generate(&resources, &relationships);
    for rel in &relationships {
        assert!(script.contains(&cypher::node_statement(rel.source)));
        assert!(script.contains(&cypher::node_statement(rel.target)));
    }
    assert!(script.ends_with(
        "MATCH (a:StatefulSet {name: 'db'}), (b:PersistentVolumeClaim {name: 'pvc1'}) MERGE (a)-[:USES_PVC]->(b);\n"
    ));
}
