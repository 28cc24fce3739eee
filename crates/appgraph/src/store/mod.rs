//! Entity store abstraction.
//!
//! The graph engine reads registry entities only through the [`EntityStore`]
//! trait. Two backends exist:
//!
//! - **In-memory**: seedable store shared through `Arc<RwLock<_>>`, used by
//!   tests and embedders that already hold the data
//! - **JSONL**: reads the registry's `.jsonl` files on every call
//!
//! The trait is object-safe so the query facade can hold an
//! `Arc<dyn EntityStore>`.
//!
//! # Example
//!
//! ```no_run
//! use appgraph::store::{EntityStore, StoreBackend, create_store};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StoreBackend::Jsonl(".appgraph".into())).await?;
//!     let apps = store.list_applications().await?;
//!     println!("{} applications", apps.len());
//!     Ok(())
//! }
//! ```

use crate::domain::{Application, ApplicationId, Criticality, DependencyRecord, Route};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod in_memory;
pub mod jsonl;

pub use in_memory::InMemoryStore;
pub use jsonl::JsonlStore;

/// Read-only access to registry entities.
///
/// Every call reflects the store's current state; implementations must not
/// cache across calls. Implementations must be `Send + Sync` so one store can
/// serve concurrent queries.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Lists every application in a stable order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the backing data cannot be read.
    async fn list_applications(&self) -> Result<Vec<Application>>;

    /// Lists every dependency record in a stable order, including records
    /// without a provider.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the backing data cannot be read.
    async fn list_dependencies(&self) -> Result<Vec<DependencyRecord>>;

    /// Counts the routes owned by an application. Unknown ids count zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the backing data cannot be read.
    async fn count_routes_for(&self, app: ApplicationId) -> Result<u64>;

    /// Counts routes for several applications at once.
    ///
    /// The default issues one [`count_routes_for`](Self::count_routes_for)
    /// per id concurrently. Backends that can answer in a single read should
    /// override it.
    ///
    /// # Errors
    ///
    /// Fails if any individual count fails.
    async fn route_counts(&self, apps: &[ApplicationId]) -> Result<HashMap<ApplicationId, u64>> {
        let counts = try_join_all(apps.iter().map(|&id| async move {
            self.count_routes_for(id).await.map(|count| (id, count))
        }))
        .await?;
        Ok(counts.into_iter().collect())
    }

    /// Lists dependency records whose criticality is `critical`, in store
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the backing data cannot be read.
    async fn critical_dependencies(&self) -> Result<Vec<DependencyRecord>> {
        let deps = self.list_dependencies().await?;
        Ok(deps
            .into_iter()
            .filter(|dep| dep.criticality == Criticality::Critical)
            .collect())
    }
}

/// Store backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Empty in-memory store (ephemeral)
    InMemory,

    /// JSONL files in the given directory
    Jsonl(PathBuf),
}

impl StoreBackend {
    /// Returns the data directory for file-based backends.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        match self {
            StoreBackend::Jsonl(dir) => Some(dir.as_path()),
            StoreBackend::InMemory => None,
        }
    }
}

/// Creates a store for the given backend.
///
/// # Errors
///
/// Returns `Error::Store` if a JSONL data directory does not exist.
pub async fn create_store(backend: StoreBackend) -> Result<Arc<dyn EntityStore>> {
    match backend {
        StoreBackend::InMemory => Ok(Arc::new(InMemoryStore::new())),
        StoreBackend::Jsonl(dir) => Ok(Arc::new(JsonlStore::open(dir).await?)),
    }
}

/// Rejects application lists in which an id repeats.
pub(crate) fn check_unique_ids(applications: &[Application]) -> Result<()> {
    let mut seen = HashSet::with_capacity(applications.len());
    for app in applications {
        if !seen.insert(app.id) {
            return Err(StoreError::DuplicateApplication { id: app.id }.into());
        }
    }
    Ok(())
}

/// Tallies routes per requested application; ids without routes map to zero.
pub(crate) fn count_routes(
    routes: &[Route],
    apps: &[ApplicationId],
) -> HashMap<ApplicationId, u64> {
    let mut counts: HashMap<ApplicationId, u64> = apps.iter().map(|&id| (id, 0)).collect();
    for route in routes {
        if let Some(count) = counts.get_mut(&route.application_id) {
            *count += 1;
        }
    }
    counts
}
