//! JSONL-backed entity store.
//!
//! A registry directory holds one file per entity kind:
//!
//! ```text
//! .appgraph/
//!   applications.jsonl
//!   dependencies.jsonl
//!   routes.jsonl
//! ```
//!
//! Files are read on every call, so queries always see what is on disk. A
//! missing file reads as empty. A malformed line fails the read with
//! [`StoreError::Corrupt`] naming the file and line; unlike a loader that
//! skips bad records, the graph metrics depend on every record being present.

use crate::domain::{Application, ApplicationId, DependencyRecord, Route};
use crate::error::{Result, StoreError};
use crate::store::{EntityStore, check_unique_ids, count_routes};
use appgraph_jsonl::read_jsonl;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File holding one [`Application`] per line.
pub const APPLICATIONS_FILE: &str = "applications.jsonl";

/// File holding one [`DependencyRecord`] per line.
pub const DEPENDENCIES_FILE: &str = "dependencies.jsonl";

/// File holding one [`Route`] per line.
pub const ROUTES_FILE: &str = "routes.jsonl";

/// [`EntityStore`] over a directory of JSONL files.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Opens the store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if `dir` is not a directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {
                tracing::debug!(dir = %dir.display(), "Opened JSONL store");
                Ok(Self { dir })
            }
            Ok(_) => Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                dir.display()
            ))
            .into()),
            Err(e) => Err(StoreError::Unavailable(format!("{}: {e}", dir.display())).into()),
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_file<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(name);
        match read_jsonl(&path).await {
            Ok(records) => Ok(records),
            Err(appgraph_jsonl::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Data file missing, reading as empty");
                Ok(Vec::new())
            }
            Err(appgraph_jsonl::Error::Io(e)) => {
                Err(StoreError::Unavailable(format!("{}: {e}", path.display())).into())
            }
            Err(e) => {
                let line_number = e.line_number();
                tracing::warn!(
                    path = %path.display(),
                    line = ?line_number,
                    error = %e,
                    "Corrupt data file"
                );
                Err(StoreError::Corrupt {
                    path,
                    line_number,
                    reason: corrupt_reason(e),
                }
                .into())
            }
        }
    }
}

fn corrupt_reason(error: appgraph_jsonl::Error) -> String {
    match error {
        appgraph_jsonl::Error::Parse { source, .. } | appgraph_jsonl::Error::Json(source) => {
            source.to_string()
        }
        appgraph_jsonl::Error::Io(e) => e.to_string(),
    }
}

#[async_trait]
impl EntityStore for JsonlStore {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        let applications: Vec<Application> = self.read_file(APPLICATIONS_FILE).await?;
        check_unique_ids(&applications)?;
        Ok(applications)
    }

    async fn list_dependencies(&self) -> Result<Vec<DependencyRecord>> {
        self.read_file(DEPENDENCIES_FILE).await
    }

    async fn count_routes_for(&self, app: ApplicationId) -> Result<u64> {
        let counts = self.route_counts(&[app]).await?;
        Ok(counts.get(&app).copied().unwrap_or(0))
    }

    async fn route_counts(&self, apps: &[ApplicationId]) -> Result<HashMap<ApplicationId, u64>> {
        let routes: Vec<Route> = self.read_file(ROUTES_FILE).await?;
        Ok(count_routes(&routes, apps))
    }
}
