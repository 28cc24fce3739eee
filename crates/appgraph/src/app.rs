//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use appgraph::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let stats = app.service().stats().await?;
//!     println!("{} applications", stats.total_applications);
//!     Ok(())
//! }
//! ```

use crate::commands::init::find_registry_root;
use crate::config::{CONFIG_FILE_NAME, REGISTRY_DIR_NAME, RegistryConfig};
use crate::error::{Error, Result};
use crate::query::GraphService;
use crate::store::create_store;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Locates the registry, loads its configuration and wires the configured
/// store into a [`GraphService`].
#[derive(Debug)]
pub struct App {
    service: GraphService,
    registry_dir: PathBuf,
    config: RegistryConfig,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.appgraph/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No registry is found in the directory tree
    /// - Configuration cannot be loaded or is invalid
    /// - The configured store cannot be opened
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_registry_root(working_dir).ok_or(Error::NotInitialized)?;
        let registry_dir = root_dir.join(REGISTRY_DIR_NAME);

        let config = RegistryConfig::load(&registry_dir.join(CONFIG_FILE_NAME)).await?;
        let backend = config.storage.to_backend(&root_dir)?;
        tracing::debug!(?backend, "Opening store");
        let store = create_store(backend).await?;

        Ok(Self {
            service: GraphService::new(store, config.query),
            registry_dir,
            config,
        })
    }

    /// The query facade.
    pub fn service(&self) -> &GraphService {
        &self.service
    }

    /// Path to the `.appgraph` directory.
    pub fn registry_dir(&self) -> &Path {
        &self.registry_dir
    }

    /// The loaded configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
