//! Application configuration.
//!
//! Settings come from a TOML file with three optional sections:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! log_level = "info"
//!
//! [search]
//! default_radius_miles = 50
//! max_candidates = 50
//!
//! [repository]
//! type = "local"
//! seed_path = "data/sample_venues.json"
//! ```
//!
//! Environment variables (`HOST`, `PORT`, `RUST_LOG`, `REPOSITORY_TYPE`,
//! `SEED_DATA`) override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::db::repository::RepositoryError;
use crate::models::DEFAULT_RADIUS_MILES;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "BARFINDER_CONFIG";

/// Default upper bound on candidate venues fetched per search.
pub const DEFAULT_MAX_CANDIDATES: usize = 50;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Search tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Radius used when a proximity search does not give one.
    #[serde(default = "default_radius_miles")]
    pub default_radius_miles: u32,
    /// Maximum venues requested from the repository.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_radius_miles() -> u32 {
    DEFAULT_RADIUS_MILES
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_miles: default_radius_miles(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            seed_path: None,
        }
    }
}

impl FromStr for AppConfig {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// A relative `seed_path` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: AppConfig = content.parse()?;
        if let (Some(seed), Some(dir)) = (config.repository.seed_path.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the standard locations.
    ///
    /// Uses the file named by `BARFINDER_CONFIG` when set, otherwise the first
    /// of `barfinder.toml` or `backend/barfinder.toml` that exists, otherwise
    /// built-in defaults. Environment overrides are applied last.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => {
                let search_paths = [
                    PathBuf::from("barfinder.toml"),
                    PathBuf::from("backend/barfinder.toml"),
                ];
                match search_paths.iter().find(|path| path.exists()) {
                    Some(path) => Self::from_file(path)?,
                    None => Self::default(),
                }
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override settings from `HOST`, `PORT`, `RUST_LOG`, `REPOSITORY_TYPE`
    /// and `SEED_DATA`.
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!("Invalid PORT value: {}", port))
            })?;
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.server.log_level = level;
        }
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(seed) = std::env::var("SEED_DATA") {
            self.repository.seed_path = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search.default_radius_miles, 50);
        assert_eq!(config.search.max_candidates, 50);
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[search]
max_candidates = 10

[repository]
type = "memory"
"#;
        let config: AppConfig = toml.parse().unwrap();
        assert_eq!(config.search.max_candidates, 10);
        assert_eq!(config.search.default_radius_miles, 50);
        assert_eq!(config.repository.repo_type, "memory");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = "[search\n".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }
}
