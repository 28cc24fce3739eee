//! Registry configuration.
//!
//! Lives in `.appgraph/config.yaml`:
//!
//! ```yaml
//! storage:
//!   backend: jsonl
//!   data_dir: .appgraph
//! query:
//!   default_tree_depth: 5
//!   max_tree_depth: 10
//!   store_timeout_ms: 5000
//!   cycle_search: first-per-root
//! ```
//!
//! The `query` section and each of its keys are optional.

use crate::error::{Error, Result};
use crate::query::QueryConfig;
use crate::store::StoreBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Name of the registry directory
pub const REGISTRY_DIR_NAME: &str = ".appgraph";

/// Name of the configuration file inside the registry directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Backend name for JSONL files
pub const JSONL_BACKEND: &str = "jsonl";

/// Backend name for the empty in-memory store
pub const MEMORY_BACKEND: &str = "memory";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Query tunables
    #[serde(default)]
    pub query: QueryConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend type: `jsonl` or `memory`
    pub backend: String,

    /// Data directory, relative to the registry root
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolves the configured backend against the registry root.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unknown backend name.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StoreBackend> {
        match self.backend.as_str() {
            JSONL_BACKEND => Ok(StoreBackend::Jsonl(root_dir.join(&self.data_dir))),
            MEMORY_BACKEND => Ok(StoreBackend::InMemory),
            other => Err(Error::Config(format!(
                "Unknown storage backend '{other}' (expected '{JSONL_BACKEND}' or '{MEMORY_BACKEND}')"
            ))),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: JSONL_BACKEND.to_string(),
                data_dir: REGISTRY_DIR_NAME.to_string(),
            },
            query: QueryConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Loads and validates configuration from a file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML for this
    /// structure, or holds unusable values.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), backend = %config.storage.backend, "Loaded config");
        Ok(config)
    }

    /// Saves configuration to a file.
    ///
    /// # Errors
    ///
    /// Fails if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Checks the backend name and query tunables.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.storage.to_backend(Path::new("."))?;
        self.query.validate()
    }
}
