//! Repository factory for dependency injection.
//!
//! Builds a repository instance from runtime configuration so that callers
//! only ever hold an `Arc<dyn FullRepository>`.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

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

    /// Parse repository type from string ("local" or "memory").
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
/// use barfinder::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `seed_path` - Optional JSON seed file to load into it
    pub fn create(
        repo_type: RepositoryType,
        seed_path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => match seed_path {
                Some(path) => {
                    let repo = LocalRepository::from_json_file(path)?;
                    info!(
                        path = %path.display(),
                        venues = repo.venue_count(),
                        "local repository seeded"
                    );
                    Ok(Arc::new(repo))
                }
                None => Ok(Self::create_local()),
            },
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from the `[repository]` configuration section.
    pub fn from_settings(
        settings: &RepositorySettings,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = settings.repo_type.parse::<RepositoryType>().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        Self::create(repo_type, settings.seed_path.as_deref())
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use barfinder::db::{RepositoryBuilder, RepositoryType};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .seed_path("data/sample_venues.json")
///     .build()
///     .unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    seed_path: Option<PathBuf>,
}

impl RepositoryBuilder {
    /// Create a new builder for an unseeded local repository.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
            seed_path: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the seed file to load.
    pub fn seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryFactory::create(self.repo_type, self.seed_path.as_deref())
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
