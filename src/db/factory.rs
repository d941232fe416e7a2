//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryResult};

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
    /// * `s` - String representation ("local")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }
        Self::Local
    }
}

/// Repository factory for creating repository instances.
///
/// This factory provides a centralized way to create repository instances
/// with proper initialization and configuration.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Boxed repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory local repository.
    ///
    /// # Returns
    /// Boxed local repository instance
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from runtime configuration.
    ///
    /// `REPOSITORY_TYPE` wins when set; otherwise a `repository.toml` in a
    /// standard location is consulted, falling back to the local backend.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = if std::env::var("REPOSITORY_TYPE").is_ok() {
            RepositoryType::from_env()
        } else {
            super::repo_config::RepositoryConfig::from_default_location()
                .ok()
                .and_then(|config| config.repository_type().ok())
                .unwrap_or(RepositoryType::Local)
        };
        Self::create(repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("Memory").unwrap(), RepositoryType::Local);
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[test]
    fn test_create_local() {
        let repo = RepositoryFactory::create(RepositoryType::Local);
        assert!(repo.is_ok());
    }
}
