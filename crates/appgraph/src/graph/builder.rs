//! Turns store rows into a [`GraphSnapshot`].

use super::types::{Edge, GraphSnapshot, GraphStats, Node};
use crate::domain::{Application, ApplicationId, DependencyRecord};
use std::collections::{BTreeMap, HashMap};

/// Builds a snapshot from applications, dependency records and route counts.
///
/// Nodes follow application order and edges follow record order. Records
/// without a provider count towards the consumer's `dependencies_count` and
/// `total_dependencies` but produce no edge. Applications missing from
/// `route_counts` get zero routes. Endpoints are not validated: an edge may
/// point at an id that has no node.
#[must_use]
pub fn build_snapshot(
    applications: Vec<Application>,
    dependencies: Vec<DependencyRecord>,
    route_counts: &HashMap<ApplicationId, u64>,
) -> GraphSnapshot {
    let mut required: HashMap<ApplicationId, u64> = HashMap::new();
    let mut provided: HashMap<ApplicationId, u64> = HashMap::new();
    for dep in &dependencies {
        *required.entry(dep.consumer_id).or_default() += 1;
        if let Some(provider) = dep.provider_id {
            *provided.entry(provider).or_default() += 1;
        }
    }

    let nodes: Vec<Node> = applications
        .into_iter()
        .map(|app| Node {
            dependencies_count: required.get(&app.id).copied().unwrap_or(0),
            dependents_count: provided.get(&app.id).copied().unwrap_or(0),
            routes_count: route_counts.get(&app.id).copied().unwrap_or(0),
            id: app.id,
            code: app.code,
            name: app.name,
            display_name: app.display_name,
            node_type: app.app_type,
            status: app.status,
            category: app.category,
            icon: app.icon,
            color: app.color,
            frontend_url: app.frontend_url,
            backend_url: app.backend_url,
            description: app.description,
        })
        .collect();

    let total_dependencies = dependencies.len();
    let edges: Vec<Edge> = dependencies
        .into_iter()
        .filter_map(|dep| {
            let target = dep.provider_id?;
            Some(Edge {
                id: dep.id,
                source: dep.consumer_id,
                target,
                name: dep.name,
                edge_type: dep.dependency_type,
                criticality: dep.criticality,
                description: dep.description,
            })
        })
        .collect();

    let stats = compute_stats(&nodes, edges.len());
    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        dependencies = total_dependencies,
        "Built graph snapshot"
    );
    GraphSnapshot::new(nodes, edges, total_dependencies, stats)
}

fn compute_stats(nodes: &[Node], total_edges: usize) -> GraphStats {
    let mut by_type = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    let mut by_category = BTreeMap::new();

    for node in nodes {
        *by_type.entry(node.node_type.as_str().to_string()).or_insert(0) += 1;
        *by_status.entry(node.status.as_str().to_string()).or_insert(0) += 1;
        if let Some(category) = node.category.as_deref().filter(|c| !c.is_empty()) {
            *by_category.entry(category.to_string()).or_insert(0) += 1;
        }
    }

    GraphStats {
        total_nodes: nodes.len(),
        total_edges,
        by_type,
        by_status,
        by_category,
    }
}
