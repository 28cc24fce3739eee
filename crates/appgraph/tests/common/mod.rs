//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use appgraph::domain::{
    AppStatus, AppType, Application, ApplicationId, Criticality, DependencyRecord, DependencyType,
    Route,
};
use appgraph::query::{GraphService, QueryConfig};
use appgraph::store::InMemoryStore;
use std::sync::Arc;

/// Shorthand for an application id.
pub fn id(raw: i64) -> ApplicationId {
    ApplicationId(raw)
}

/// Application with a category, type and status.
pub fn app(
    raw: i64,
    code: &str,
    app_type: AppType,
    status: AppStatus,
    category: Option<&str>,
) -> Application {
    let mut app = Application::new(raw, code);
    app.display_name = code.replace('-', " ").to_uppercase();
    app.app_type = app_type;
    app.status = status;
    app.category = category.map(str::to_string);
    app
}

/// Dependency from `consumer` to `provider` with the given criticality.
pub fn dep(
    raw: i64,
    consumer: i64,
    provider: Option<i64>,
    criticality: Criticality,
) -> DependencyRecord {
    let mut dep = DependencyRecord::new(
        raw,
        consumer,
        provider.map(ApplicationId),
        format!("dep-{raw}"),
    );
    dep.dependency_type = DependencyType::Api;
    dep.criticality = criticality;
    dep
}

/// Route owned by `owner`.
pub fn route(raw: i64, owner: i64, path: &str) -> Route {
    Route {
        id: raw,
        application_id: ApplicationId(owner),
        path: path.to_string(),
        method: "GET".to_string(),
        summary: None,
    }
}

/// A small shop registry:
///
/// ```text
/// 1 web ──► 2 api ──► 4 db
///   │         └──► 5 cache ──► (external)
///   └──► 3 auth ──► 4 db
/// 6 reports (isolated)
/// ```
pub fn shop_store() -> InMemoryStore {
    let apps = vec![
        app(1, "web", AppType::Feature, AppStatus::Active, Some("frontend")),
        app(2, "api", AppType::Core, AppStatus::Active, Some("backend")),
        app(3, "auth", AppType::Core, AppStatus::Active, Some("backend")),
        app(4, "db", AppType::Core, AppStatus::Active, None),
        app(5, "cache", AppType::Core, AppStatus::Development, Some("")),
        app(6, "reports", AppType::Feature, AppStatus::Deprecated, Some("frontend")),
    ];
    let deps = vec![
        dep(1, 1, Some(2), Criticality::Critical),
        dep(2, 1, Some(3), Criticality::High),
        dep(3, 2, Some(4), Criticality::Critical),
        dep(4, 2, Some(5), Criticality::Medium),
        dep(5, 3, Some(4), Criticality::High),
        dep(6, 5, None, Criticality::Low),
    ];
    let routes = vec![
        route(1, 1, "/"),
        route(2, 1, "/cart"),
        route(3, 2, "/api/orders"),
    ];
    InMemoryStore::seeded(apps, deps, routes).expect("unique application ids")
}

/// Service over `store` with default configuration.
pub fn service(store: InMemoryStore) -> GraphService {
    GraphService::new(Arc::new(store), QueryConfig::default())
}
