//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating repository instances based on
//! runtime configuration.

use log::info;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::config::RepositorySettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use stay_rust::config::RepositorySettings;
/// use stay_rust::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::from_settings(&RepositorySettings::default()).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty repository of the given type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn FullRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a local repository pre-filled from a JSON seed file.
    pub fn create_local_seeded<P: AsRef<Path>>(
        seed_file: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::from_seed_file(seed_file)?;
        Ok(Arc::new(repo))
    }

    /// Create repository from the `[repository]` configuration section.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If the type is unknown or the seed file is unreadable
    pub fn from_settings(settings: &RepositorySettings) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = settings
            .repository_type()
            .map_err(|e| RepositoryError::configuration(e.to_string()))?;

        match (repo_type, settings.seed_file.as_ref()) {
            (RepositoryType::Local, Some(seed)) => Self::create_local_seeded(seed),
            (RepositoryType::Local, None) => {
                info!("Using empty in-memory repository");
                Ok(Self::create(repo_type))
            }
        }
    }
}
