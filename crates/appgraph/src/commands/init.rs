//! Implementation of the `init` command.
//!
//! Creates the `.appgraph/` registry directory with a default configuration
//! and empty entity files.

use crate::config::{CONFIG_FILE_NAME, REGISTRY_DIR_NAME, RegistryConfig};
use crate::domain::{Application, DependencyRecord, Route};
use crate::error::{Error, Result};
use crate::store::jsonl::{APPLICATIONS_FILE, DEPENDENCIES_FILE, ROUTES_FILE};
use appgraph_jsonl::write_jsonl_atomic;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maximum directory depth to traverse when searching for the registry root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the registry directory
    pub registry_dir: PathBuf,
    /// Path to the config file
    pub config_file: PathBuf,
    /// Paths to the entity files, in creation order
    pub data_files: Vec<PathBuf>,
}

/// Initialize a registry in `base_dir`.
///
/// Entity files that already exist are kept, so `force` only rewrites the
/// configuration and never discards registry data.
///
/// # Errors
///
/// Returns an error if:
/// - `.appgraph/` already exists and `force` is false
/// - File system operations fail
pub async fn init(base_dir: &Path, force: bool) -> Result<InitResult> {
    let registry_dir = base_dir.join(REGISTRY_DIR_NAME);

    if registry_dir.exists() && !force {
        return Err(Error::Config(format!(
            "Registry already initialized. Found existing '{REGISTRY_DIR_NAME}' (use --force to reset the configuration)"
        )));
    }

    fs::create_dir_all(&registry_dir).await?;

    let config_file = registry_dir.join(CONFIG_FILE_NAME);
    RegistryConfig::default().save(&config_file).await?;

    let applications = create_if_missing::<Application>(&registry_dir, APPLICATIONS_FILE).await?;
    let dependencies =
        create_if_missing::<DependencyRecord>(&registry_dir, DEPENDENCIES_FILE).await?;
    let routes = create_if_missing::<Route>(&registry_dir, ROUTES_FILE).await?;

    tracing::info!(dir = %registry_dir.display(), "Initialized registry");

    Ok(InitResult {
        registry_dir,
        config_file,
        data_files: vec![applications, dependencies, routes],
    })
}

async fn create_if_missing<T: serde::Serialize>(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.exists() {
        write_jsonl_atomic(&path, Vec::<T>::new())
            .await
            .map_err(|e| Error::Config(format!("Failed to create {}: {e}", path.display())))?;
    }
    Ok(path)
}

/// Check if a directory has been initialized as a registry.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(REGISTRY_DIR_NAME).is_dir()
}

/// Find the registry root by searching up the directory tree.
///
/// Returns the directory containing `.appgraph/`, or `None` if none is found
/// before the filesystem root or the traversal limit.
pub fn find_registry_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
