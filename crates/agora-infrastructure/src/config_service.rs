//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/agora/config.toml).

use crate::paths::AgoraPaths;
use agora_core::config::RootConfig;
use agora_core::error::{AgoraError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// This implementation reads the configuration from config.toml
/// and caches it to avoid repeated file I/O operations.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file location.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading a specific file (for testing and `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing or unreadable file yields the default configuration; the
    /// failure is logged. Use [`ConfigService::try_get_config`] when the
    /// caller must surface it.
    pub fn get_config(&self) -> RootConfig {
        self.try_get_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            RootConfig::default()
        })
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// Only a successfully loaded configuration is cached.
    pub fn try_get_config(&self) -> Result<RootConfig> {
        // Check if already cached
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_from(&self.config_path()?)?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Loads RootConfig from a TOML file.
    ///
    /// # Returns
    ///
    /// - `Ok(RootConfig)`: parsed config, or defaults when the file does not exist
    /// - `Err(_)`: the file exists but could not be read or parsed
    pub fn load_from(path: &Path) -> Result<RootConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: RootConfig = toml::from_str(&content).map_err(|e| {
            AgoraError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Path this service reads from.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => AgoraPaths::config_file().map_err(|e| AgoraError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_load_and_cache() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [store]
            project_id = "agora-test"
            collection = "profiles"

            [directory]
            default_page_size = 10
            "#,
        )
        .unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get_config();
        assert!(config.store.is_configured());
        assert_eq!(config.store.collection, "profiles");
        assert_eq!(config.directory.default_page_size, 10);

        // Cached: edits are invisible until the cache is invalidated
        std::fs::write(&path, "[directory]\ndefault_page_size = 3\n").unwrap();
        assert_eq!(service.get_config().directory.default_page_size, 10);

        service.invalidate_cache();
        let reloaded = service.get_config();
        assert_eq!(reloaded.directory.default_page_size, 3);
        assert!(!reloaded.store.is_configured());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[directory]\ndefault_page_size = \"many\"\n").unwrap();

        let err = ConfigService::load_from(&path).unwrap_err();
        assert!(err.is_config());

        // The strict accessor surfaces the error, the lenient one falls back
        let service = ConfigService::with_path(&path);
        assert!(service.try_get_config().unwrap_err().is_config());
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_mistyped_store_section_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nseed_path = 5\n").unwrap();

        let service = ConfigService::with_path(&path);
        assert!(service.try_get_config().unwrap_err().is_config());

        // A failed load is not cached
        std::fs::write(&path, "[store]\nseed_path = \"seed.json\"\n").unwrap();
        let config = service.try_get_config().unwrap();
        assert_eq!(config.store.seed_path, Some("seed.json".into()));
    }
}
