//! Query facade over the graph engine.
//!
//! [`GraphService`] is the single entry point callers use. Each operation
//! reads the store itself under a timeout, builds a private
//! [`GraphSnapshot`], and runs one algorithm on it. Nothing is cached, so two
//! calls may see different data if the store changed in between.
//!
//! # Example
//!
//! ```no_run
//! use appgraph::query::{GraphService, QueryConfig};
//! use appgraph::store::InMemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let service = GraphService::new(Arc::new(InMemoryStore::new()), QueryConfig::default());
//!     let graph = service.full_graph().await?;
//!     println!("{} applications", graph.total_apps());
//!     Ok(())
//! }
//! ```

use crate::domain::{ApplicationId, DependencyRecord};
use crate::error::{Error, Result, StoreError};
use crate::graph::{
    self, Cycle, CycleSearch, DependencyPath, DependencyTree, GraphSnapshot, ImpactReport,
    PathOutcome,
};
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Tree depth used when a request does not give one.
pub const DEFAULT_TREE_DEPTH: usize = 5;

/// Largest tree depth a request may ask for.
pub const MAX_TREE_DEPTH: usize = 10;

/// Store read budget per query, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Tunables for [`GraphService`]; the `query` section of the registry config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Depth for tree requests that do not specify one
    pub default_tree_depth: usize,
    /// Upper bound accepted for tree requests
    pub max_tree_depth: usize,
    /// Budget for one query's store reads
    pub store_timeout_ms: u64,
    /// Cycle search mode when a request does not pick one
    pub cycle_search: CycleSearch,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_tree_depth: DEFAULT_TREE_DEPTH,
            max_tree_depth: MAX_TREE_DEPTH,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            cycle_search: CycleSearch::default(),
        }
    }
}

impl QueryConfig {
    /// Checks that the values are usable together.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `max_tree_depth` is zero,
    /// `default_tree_depth` is outside `1..=max_tree_depth`, or the timeout
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_tree_depth == 0 {
            return Err(Error::Config("max_tree_depth must be at least 1".to_string()));
        }
        if !(1..=self.max_tree_depth).contains(&self.default_tree_depth) {
            return Err(Error::Config(format!(
                "default_tree_depth must be between 1 and {}",
                self.max_tree_depth
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(Error::Config("store_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// The store read budget as a [`Duration`].
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

/// Names an application by numeric id or by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSelector {
    /// Numeric application id
    Id(ApplicationId),
    /// Application code
    Code(String),
}

impl FromStr for AppSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("application must not be empty".to_string());
        }
        Ok(match s.parse::<i64>() {
            Ok(id) => Self::Id(ApplicationId(id)),
            Err(_) => Self::Code(s.to_string()),
        })
    }
}

impl fmt::Display for AppSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// Registry-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatsReport {
    /// Number of applications
    pub total_applications: usize,
    /// Number of dependency records, external ones included
    pub total_dependencies: usize,
    /// Number of graph nodes
    pub total_nodes: usize,
    /// Number of graph edges
    pub total_edges: usize,
    /// Nodes per application type
    pub by_type: BTreeMap<String, usize>,
    /// Nodes per status
    pub by_status: BTreeMap<String, usize>,
    /// Nodes per non-empty category
    pub by_category: BTreeMap<String, usize>,
}

impl From<&GraphSnapshot> for GraphStatsReport {
    fn from(snapshot: &GraphSnapshot) -> Self {
        let stats = snapshot.stats();
        Self {
            total_applications: snapshot.total_apps(),
            total_dependencies: snapshot.total_dependencies(),
            total_nodes: stats.total_nodes,
            total_edges: stats.total_edges,
            by_type: stats.by_type.clone(),
            by_status: stats.by_status.clone(),
            by_category: stats.by_category.clone(),
        }
    }
}

/// Whether a snapshot needs per-application route counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Routes {
    Count,
    Skip,
}

/// Answers structural questions about the registry.
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct GraphService {
    store: Arc<dyn EntityStore>,
    config: QueryConfig,
}

impl fmt::Debug for GraphService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphService")
            .field("store", &"<dyn EntityStore>")
            .field("config", &self.config)
            .finish()
    }
}

impl GraphService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The complete graph: nodes with metrics, edges, totals and stats.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the read fails or times out.
    pub async fn full_graph(&self) -> Result<GraphSnapshot> {
        self.snapshot(Routes::Count).await
    }

    /// Registry-wide counts.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the read fails or times out.
    pub async fn stats(&self) -> Result<GraphStatsReport> {
        let snapshot = self.snapshot(Routes::Skip).await?;
        Ok(GraphStatsReport::from(&snapshot))
    }

    /// What `app` depends on, as a spanning tree at most `max_depth` deep.
    ///
    /// `None` uses the configured default depth.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidRequest` if `max_depth` is outside `1..=max_tree_depth`
    /// - `Error::ApplicationNotFound` if `app` does not exist
    /// - `Error::Store` if the read fails or times out
    pub async fn dependency_tree(
        &self,
        app: ApplicationId,
        max_depth: Option<usize>,
    ) -> Result<DependencyTree> {
        let depth = max_depth.unwrap_or(self.config.default_tree_depth);
        if !(1..=self.config.max_tree_depth).contains(&depth) {
            return Err(Error::InvalidRequest(format!(
                "depth must be between 1 and {}, got {depth}",
                self.config.max_tree_depth
            )));
        }

        let snapshot = self.snapshot(Routes::Skip).await?;
        graph::build_tree(&snapshot, app, depth).ok_or(Error::ApplicationNotFound(app))
    }

    /// Shortest dependency chain from `from` to `to`, or `None` if `to` is
    /// not reachable.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidRequest` if `from == to`
    /// - `Error::ApplicationNotFound` if either application does not exist
    /// - `Error::Store` if the read fails or times out
    pub async fn find_path(
        &self,
        from: ApplicationId,
        to: ApplicationId,
    ) -> Result<Option<DependencyPath>> {
        if from == to {
            return Err(Error::InvalidRequest(
                "source and target applications must differ".to_string(),
            ));
        }

        let snapshot = self.snapshot(Routes::Skip).await?;
        match graph::find_path(&snapshot, from, to) {
            PathOutcome::Found(path) => Ok(Some(path)),
            PathOutcome::Unreachable => Ok(None),
            PathOutcome::UnknownApplication(id) => Err(Error::ApplicationNotFound(id)),
        }
    }

    /// Circular dependencies; `None` uses the configured search mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the read fails or times out.
    pub async fn circular_dependencies(&self, search: Option<CycleSearch>) -> Result<Vec<Cycle>> {
        let snapshot = self.snapshot(Routes::Skip).await?;
        Ok(graph::find_cycles(
            &snapshot,
            search.unwrap_or(self.config.cycle_search),
        ))
    }

    /// Dependency records marked critical, straight from the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the read fails or times out.
    pub async fn critical_dependencies(&self) -> Result<Vec<DependencyRecord>> {
        self.bounded("critical dependency read", self.store.critical_dependencies())
            .await
    }

    /// Everything that breaks, directly or transitively, without `app`.
    ///
    /// # Errors
    ///
    /// - `Error::ApplicationNotFound` if `app` does not exist
    /// - `Error::Store` if the read fails or times out
    pub async fn impact(&self, app: ApplicationId) -> Result<ImpactReport> {
        let snapshot = self.snapshot(Routes::Skip).await?;
        graph::analyze_impact(&snapshot, app).ok_or(Error::ApplicationNotFound(app))
    }

    /// Turns a selector into an id.
    ///
    /// A numeric selector names the application with that id. When no
    /// application has it, an application whose code is the same digits is
    /// used instead; failing both, the id passes through and the query that
    /// uses it reports it unknown. Codes are looked up in the store.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownApplicationCode` if no application has the code
    /// - `Error::Store` if the read fails or times out
    pub async fn resolve(&self, selector: &AppSelector) -> Result<ApplicationId> {
        let apps = self
            .bounded("application read", self.store.list_applications())
            .await?;
        match selector {
            AppSelector::Id(id) => {
                if apps.iter().any(|app| app.id == *id) {
                    return Ok(*id);
                }
                let digits = id.to_string();
                Ok(apps
                    .iter()
                    .find(|app| app.code == digits)
                    .map_or(*id, |app| app.id))
            }
            AppSelector::Code(code) => apps
                .iter()
                .find(|app| app.code == *code)
                .map(|app| app.id)
                .ok_or_else(|| Error::UnknownApplicationCode(code.clone())),
        }
    }

    async fn snapshot(&self, routes: Routes) -> Result<GraphSnapshot> {
        let read = async {
            let (applications, dependencies) = tokio::try_join!(
                self.store.list_applications(),
                self.store.list_dependencies()
            )?;
            let route_counts = match routes {
                Routes::Count => {
                    let ids: Vec<ApplicationId> = applications.iter().map(|app| app.id).collect();
                    self.store.route_counts(&ids).await?
                }
                Routes::Skip => HashMap::new(),
            };
            Ok::<_, Error>((applications, dependencies, route_counts))
        };
        let (applications, dependencies, route_counts) = self.bounded("graph read", read).await?;
        Ok(graph::build_snapshot(applications, dependencies, &route_counts))
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        read: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.config.store_timeout(), read).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.config.store_timeout_ms,
                    "Store read timed out"
                );
                Err(StoreError::Timeout {
                    operation,
                    after_ms: self.config.store_timeout_ms,
                }
                .into())
            }
        }
    }
}
