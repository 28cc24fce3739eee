//! In-memory entity store.
//!
//! Data lives behind an `Arc<RwLock<_>>`, so clones share state: a test can
//! keep one handle to mutate the registry while a `GraphService` queries
//! through another.

use crate::domain::{Application, ApplicationId, DependencyRecord, Route};
use crate::error::{Result, StoreError};
use crate::store::{EntityStore, check_unique_ids, count_routes};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Registry {
    applications: Vec<Application>,
    dependencies: Vec<DependencyRecord>,
    routes: Vec<Route>,
}

/// Seedable, in-memory [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Registry>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given entities, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateApplication` if two applications share
    /// an id.
    pub fn seeded(
        applications: Vec<Application>,
        dependencies: Vec<DependencyRecord>,
        routes: Vec<Route>,
    ) -> Result<Self> {
        check_unique_ids(&applications)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Registry {
                applications,
                dependencies,
                routes,
            })),
        })
    }

    /// Appends an application.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateApplication` if the id is taken.
    pub async fn insert_application(&self, app: Application) -> Result<()> {
        let mut registry = self.inner.write().await;
        if registry.applications.iter().any(|a| a.id == app.id) {
            return Err(StoreError::DuplicateApplication { id: app.id }.into());
        }
        registry.applications.push(app);
        Ok(())
    }

    /// Appends a dependency record. Endpoints are not validated.
    pub async fn insert_dependency(&self, dep: DependencyRecord) {
        self.inner.write().await.dependencies.push(dep);
    }

    /// Appends a route.
    pub async fn insert_route(&self, route: Route) {
        self.inner.write().await.routes.push(route);
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        Ok(self.inner.read().await.applications.clone())
    }

    async fn list_dependencies(&self) -> Result<Vec<DependencyRecord>> {
        Ok(self.inner.read().await.dependencies.clone())
    }

    async fn count_routes_for(&self, app: ApplicationId) -> Result<u64> {
        let registry = self.inner.read().await;
        let count = registry
            .routes
            .iter()
            .filter(|route| route.application_id == app)
            .count();
        Ok(count as u64)
    }

    async fn route_counts(&self, apps: &[ApplicationId]) -> Result<HashMap<ApplicationId, u64>> {
        let registry = self.inner.read().await;
        Ok(count_routes(&registry.routes, apps))
    }
}
