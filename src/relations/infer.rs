//! Relationship inference
//!
//! Derives typed edges by cross-referencing fields between resources. The
//! input is walked once, in order. For each resource the rules matching its
//! kind run in a fixed order, and every target lookup scans the whole input
//! in order, so the edge sequence is fully determined by the input sequence.
//!
//! Targets are matched by exact, case-sensitive name within the expected
//! kind. Namespaces are not compared: two resources of the same kind and name
//! in different namespaces both receive an edge.

use crate::models::{Container, Resource, ResourceKind, Volume};
use crate::relations::model::{EdgeProperties, EdgeType, Relationship};

/// Accumulates edges in emission order
struct EdgeBuilder<'a> {
    resources: &'a [Resource],
    edges: Vec<Relationship<'a>>,
}

impl<'a> EdgeBuilder<'a> {
    fn new(resources: &'a [Resource]) -> Self {
        Self {
            resources,
            edges: Vec::new(),
        }
    }

    fn push(
        &mut self,
        source: &'a Resource,
        target: &'a Resource,
        edge_type: EdgeType,
        properties: EdgeProperties,
    ) {
        tracing::debug!(
            "Edge {}/{} --[{}]--> {}/{}",
            source.kind,
            source.name(),
            edge_type,
            target.kind,
            target.name()
        );
        self.edges.push(Relationship {
            source,
            target,
            edge_type,
            properties,
        });
    }

    /// Emit one edge per resource of `kind` named `name`
    fn connect_by_name(
        &mut self,
        source: &'a Resource,
        kind: ResourceKind,
        name: &str,
        edge_type: EdgeType,
        properties: EdgeProperties,
    ) {
        if name.is_empty() {
            return;
        }
        let resources = self.resources;
        let mut matched = 0usize;
        for target in resources.iter().filter(|r| r.is(kind) && r.name() == name) {
            self.push(source, target, edge_type, properties.clone());
            matched += 1;
        }
        if matched == 0 {
            tracing::debug!(
                "{}/{} references {} '{}' which is not in the manifest",
                source.kind,
                source.name(),
                kind,
                name
            );
        }
    }

    fn finish(self) -> Vec<Relationship<'a>> {
        self.edges
    }
}

/// Infer every relationship between the given resources.
///
/// Never fails: a resource set without matches yields an empty list.
pub fn infer(resources: &[Resource]) -> Vec<Relationship<'_>> {
    let mut builder = EdgeBuilder::new(resources);

    for resource in resources {
        match resource.kind_of() {
            Some(ResourceKind::Service) => select_deployments(&mut builder, resource),
            Some(kind) if kind.is_workload() => {
                for volume in resource.volumes() {
                    volume_references(&mut builder, resource, volume);
                }
                for container in resource.containers() {
                    env_references(&mut builder, resource, container);
                }
                if kind == ResourceKind::StatefulSet {
                    claim_templates(&mut builder, resource);
                }
            }
            _ => {}
        }
    }

    let edges = builder.finish();
    tracing::debug!(
        "Inferred {} relationships across {} resources",
        edges.len(),
        resources.len()
    );
    edges
}

/// Service -> Deployment when the selector is a subset of the labels
fn select_deployments<'a>(builder: &mut EdgeBuilder<'a>, service: &'a Resource) {
    let selector = service.selector();
    if selector.is_empty() {
        tracing::debug!("Service {} has an empty selector", service.name());
        return;
    }

    let resources = builder.resources;
    for deployment in resources.iter().filter(|r| r.is(ResourceKind::Deployment)) {
        if selector.matches(deployment.labels()) {
            builder.push(
                service,
                deployment,
                EdgeType::Selects,
                EdgeProperties::SelectorLabels(selector.clone()),
            );
        }
    }
}

/// Workload -> ConfigMap/Secret mounted as a volume
fn volume_references<'a>(builder: &mut EdgeBuilder<'a>, workload: &'a Resource, volume: &Volume) {
    if let Some(name) = volume.config_map_name() {
        builder.connect_by_name(
            workload,
            ResourceKind::ConfigMap,
            name,
            EdgeType::UsesConfig,
            EdgeProperties::Volume(volume.name.clone()),
        );
    }
    if let Some(name) = volume.secret_name() {
        builder.connect_by_name(
            workload,
            ResourceKind::Secret,
            name,
            EdgeType::UsesSecret,
            EdgeProperties::Volume(volume.name.clone()),
        );
    }
}

/// Workload -> ConfigMap/Secret consumed by a container's environment
fn env_references<'a>(
    builder: &mut EdgeBuilder<'a>,
    workload: &'a Resource,
    container: &Container,
) {
    for source in &container.env_from {
        if let Some(name) = source.config_map_name() {
            builder.connect_by_name(
                workload,
                ResourceKind::ConfigMap,
                name,
                EdgeType::UsesConfig,
                EdgeProperties::BulkImport,
            );
        }
        if let Some(name) = source.secret_name() {
            builder.connect_by_name(
                workload,
                ResourceKind::Secret,
                name,
                EdgeType::UsesSecret,
                EdgeProperties::BulkImport,
            );
        }
    }

    for var in &container.env {
        if let Some(name) = var.config_map_name() {
            builder.connect_by_name(
                workload,
                ResourceKind::ConfigMap,
                name,
                EdgeType::UsesConfig,
                EdgeProperties::EnvVar(var.name.clone()),
            );
        }
        if let Some(name) = var.secret_name() {
            builder.connect_by_name(
                workload,
                ResourceKind::Secret,
                name,
                EdgeType::UsesSecret,
                EdgeProperties::EnvVar(var.name.clone()),
            );
        }
    }
}

/// StatefulSet -> PersistentVolumeClaim named like a claim template
fn claim_templates<'a>(builder: &mut EdgeBuilder<'a>, statefulset: &'a Resource) {
    for name in statefulset.claim_template_names() {
        builder.connect_by_name(
            statefulset,
            ResourceKind::PersistentVolumeClaim,
            name,
            EdgeType::UsesPvc,
            EdgeProperties::None,
        );
    }
}
