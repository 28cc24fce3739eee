//! Graph snapshot and query result types.

use crate::domain::{AppStatus, AppType, ApplicationId, Criticality, DependencyId, DependencyType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An application as seen by the graph, with derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Application id
    pub id: ApplicationId,
    /// Application code
    pub code: String,
    /// Internal name
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Application type
    #[serde(rename = "type")]
    pub node_type: AppType,
    /// Lifecycle status
    pub status: AppStatus,
    /// Grouping, if any
    pub category: Option<String>,
    /// Icon name
    pub icon: Option<String>,
    /// Display color
    pub color: Option<String>,
    /// Frontend URL
    pub frontend_url: Option<String>,
    /// Backend URL
    pub backend_url: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Dependency records with this node as consumer, external ones included
    pub dependencies_count: u64,
    /// Dependency records with this node as provider
    pub dependents_count: u64,
    /// Routes owned by this application
    pub routes_count: u64,
}

/// A consumer → provider dependency between two application ids.
///
/// The target is not guaranteed to be a node of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Dependency record id
    pub id: DependencyId,
    /// Consumer
    pub source: ApplicationId,
    /// Provider
    pub target: ApplicationId,
    /// Relationship label
    pub name: String,
    /// Dependency type
    #[serde(rename = "type")]
    pub edge_type: DependencyType,
    /// Criticality
    pub criticality: Criticality,
    /// Description
    pub description: Option<String>,
}

/// Node counts grouped by attribute.
///
/// Maps are ordered so that equal inputs serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes
    pub total_nodes: usize,
    /// Number of edges
    pub total_edges: usize,
    /// Nodes per application type
    pub by_type: BTreeMap<String, usize>,
    /// Nodes per status
    pub by_status: BTreeMap<String, usize>,
    /// Nodes per non-empty category
    pub by_category: BTreeMap<String, usize>,
}

/// One consistent, immutable capture of the registry graph.
///
/// Built per query by [`build_snapshot`](super::build_snapshot) and dropped
/// with the response.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    total_apps: usize,
    total_dependencies: usize,
    stats: GraphStats,
    #[serde(skip)]
    index: HashMap<ApplicationId, usize>,
}

impl GraphSnapshot {
    pub(crate) fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        total_dependencies: usize,
        stats: GraphStats,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect();
        Self {
            total_apps: nodes.len(),
            nodes,
            edges,
            total_dependencies,
            stats,
            index,
        }
    }

    /// Nodes in store order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in store order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: ApplicationId) -> Option<&Node> {
        self.index.get(&id).map(|&position| &self.nodes[position])
    }

    /// Returns `true` if `id` is a node of this snapshot.
    #[must_use]
    pub fn contains(&self, id: ApplicationId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of applications.
    #[must_use]
    pub fn total_apps(&self) -> usize {
        self.total_apps
    }

    /// Number of dependency records, including those without a provider.
    #[must_use]
    pub fn total_dependencies(&self) -> usize {
        self.total_dependencies
    }

    /// Grouped node counts.
    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }
}

/// Shortest dependency chain between two applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyPath {
    /// Code of the starting application
    pub from_app: String,
    /// Code of the target application
    pub to_app: String,
    /// Codes along the path, both ends included
    pub path: Vec<String>,
    /// Number of hops
    pub length: usize,
}

/// The edge that led to a tree child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
    /// Relationship label
    pub name: String,
    /// Dependency type
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
    /// Criticality
    pub criticality: Criticality,
}

impl From<&Edge> for DependencyInfo {
    fn from(edge: &Edge) -> Self {
        Self {
            name: edge.name.clone(),
            dependency_type: edge.edge_type,
            criticality: edge.criticality,
        }
    }
}

/// Depth-bounded spanning tree of what an application depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    /// Application id
    pub app_id: ApplicationId,
    /// Application code
    pub app_code: String,
    /// Application display name
    pub app_name: String,
    /// Providers, in dependency order
    pub children: Vec<DependencyTree>,
    /// Edge from the parent; `None` on the root
    pub dependency_info: Option<DependencyInfo>,
}

impl DependencyTree {
    /// Total number of nodes in the tree, root included.
    #[must_use]
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            count += 1;
            pending.extend(tree.children.iter());
        }
        count
    }
}

/// A closed walk of application ids; first and last are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(pub Vec<ApplicationId>);

impl Cycle {
    /// The ids in walk order, closing id included.
    #[must_use]
    pub fn ids(&self) -> &[ApplicationId] {
        &self.0
    }

    /// Returns `true` if the cycle passes through `id`.
    #[must_use]
    pub fn contains(&self, id: ApplicationId) -> bool {
        self.0.contains(&id)
    }
}

/// Applications that transitively depend on one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// The application being removed or failing
    pub app_id: ApplicationId,
    /// Its code
    pub app_code: String,
    /// Dependents at depth 1
    pub direct_dependents: Vec<ImpactedApp>,
    /// Dependents at depth 2 and beyond
    pub transitive_dependents: Vec<ImpactedApp>,
    /// Largest depth reached; 0 when nothing depends on the application
    pub max_depth_reached: usize,
}

impl ImpactReport {
    /// Number of affected applications.
    #[must_use]
    pub fn total_affected(&self) -> usize {
        self.direct_dependents.len() + self.transitive_dependents.len()
    }
}

/// One affected application in an [`ImpactReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedApp {
    /// Application id
    pub app_id: ApplicationId,
    /// Application code
    pub app_code: String,
    /// Application display name
    pub app_name: String,
    /// Minimum number of hops to the impacted application
    pub depth: usize,
}
