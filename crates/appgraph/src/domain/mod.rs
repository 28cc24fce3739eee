//! Domain types for the application registry.
//!
//! These are the persisted entities the graph engine reads: applications,
//! the dependency records between them, and the routes each application
//! exposes. The engine never writes them back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ApplicationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a dependency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyId(pub i64);

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered software component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier
    pub id: ApplicationId,

    /// Short unique code, e.g. `billing-api`
    pub code: String,

    /// Internal name
    pub name: String,

    /// Human-readable name
    pub display_name: String,

    /// Kind of component
    #[serde(rename = "type", default)]
    pub app_type: AppType,

    /// Lifecycle status
    #[serde(default)]
    pub status: AppStatus,

    /// Free-form grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Frontend URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,

    /// Backend URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Application {
    /// Creates an application with the given id and code.
    ///
    /// `name` and `display_name` are both set to the code; optional fields
    /// are empty and type/status take their defaults.
    pub fn new(id: impl Into<ApplicationId>, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: id.into(),
            name: code.clone(),
            display_name: code.clone(),
            code,
            app_type: AppType::default(),
            status: AppStatus::default(),
            category: None,
            icon: None,
            color: None,
            frontend_url: None,
            backend_url: None,
            description: None,
        }
    }
}

/// A directed "consumer depends on provider" relationship.
///
/// `provider_id` is `None` for dependencies on something outside the
/// registry, such as a third-party API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Unique identifier
    pub id: DependencyId,

    /// The depending application
    pub consumer_id: ApplicationId,

    /// The application depended upon, if it is registered
    #[serde(default)]
    pub provider_id: Option<ApplicationId>,

    /// Label of the relationship
    pub name: String,

    /// Kind of dependency
    #[serde(rename = "type", default)]
    pub dependency_type: DependencyType,

    /// How bad it is when the provider is unavailable
    #[serde(default)]
    pub criticality: Criticality,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DependencyRecord {
    /// Creates a dependency record with default type and criticality.
    pub fn new(
        id: i64,
        consumer_id: impl Into<ApplicationId>,
        provider_id: Option<ApplicationId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: DependencyId(id),
            consumer_id: consumer_id.into(),
            provider_id,
            name: name.into(),
            dependency_type: DependencyType::default(),
            criticality: Criticality::default(),
            description: None,
        }
    }
}

/// An endpoint exposed by an application.
///
/// The engine only counts routes per application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Unique identifier
    pub id: i64,

    /// Owning application
    pub application_id: ApplicationId,

    /// URL path
    pub path: String,

    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,

    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Kind of application.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Platform core
    Core,
    /// User-facing feature
    #[default]
    Feature,
    /// Internal tool
    Tool,
    /// Integration with an external system
    Integration,
    /// Standalone microservice
    Microservice,
}

impl AppType {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Feature => "feature",
            Self::Tool => "tool",
            Self::Integration => "integration",
            Self::Microservice => "microservice",
        }
    }
}

/// Lifecycle status of an application.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    /// In production use
    Active,
    /// Being built
    #[default]
    Development,
    /// Scheduled for removal
    Deprecated,
    /// No longer in use
    Archived,
}

impl AppStatus {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Development => "development",
            Self::Deprecated => "deprecated",
            Self::Archived => "archived",
        }
    }
}

/// Kind of dependency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// Calls an API
    Api,
    /// Shares a database
    Database,
    /// Shares a cache
    Cache,
    /// Uses a service
    #[default]
    Service,
    /// Links a library
    Library,
    /// External system
    External,
}

impl DependencyType {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Service => "service",
            Self::Library => "library",
            Self::External => "external",
        }
    }
}

/// Criticality of a dependency.
///
/// Carried through to outputs; traversals never look at it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Consumer is down without the provider
    Critical,
    /// Major degradation
    High,
    /// Partial degradation
    #[default]
    Medium,
    /// Minor degradation
    Low,
    /// Nice to have
    Optional,
}

impl Criticality {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Optional => "optional",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(AppType, AppStatus, DependencyType, Criticality);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn application_deserializes_with_defaults() {
        let json = r#"{"id":7,"code":"billing","name":"billing","display_name":"Billing"}"#;
        let app: Application = serde_json::from_str(json).unwrap();

        assert_eq!(app.id, ApplicationId(7));
        assert_eq!(app.app_type, AppType::Feature);
        assert_eq!(app.status, AppStatus::Development);
        assert!(app.category.is_none());
    }

    #[test]
    fn application_type_uses_wire_name() {
        let mut app = Application::new(1, "core-api");
        app.app_type = AppType::Core;

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["type"], "core");
        assert!(value.get("category").is_none());
    }

    #[test]
    fn dependency_without_provider_is_external() {
        let json = r#"{"id":3,"consumer_id":1,"name":"stripe","type":"external","criticality":"high"}"#;
        let dep: DependencyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(dep.provider_id, None);
        assert_eq!(dep.dependency_type, DependencyType::External);
        assert_eq!(dep.criticality, Criticality::High);
    }

    #[test]
    fn route_method_defaults_to_get() {
        let json = r#"{"id":1,"application_id":2,"path":"/health"}"#;
        let route: Route = serde_json::from_str(json).unwrap();
        assert_eq!(route.method, "GET");
    }

    #[rstest]
    #[case(Criticality::Critical, "critical")]
    #[case(Criticality::Optional, "optional")]
    #[case(Criticality::default(), "medium")]
    fn criticality_display_matches_serde(#[case] value: Criticality, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
        assert_eq!(serde_json::to_value(value).unwrap(), expected);
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let result: Result<AppStatus, _> = serde_json::from_str("\"retired\"");
        assert!(result.is_err());
    }
}
