//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure `ConfigService`. Every
//! section and field is optional; missing values take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project id the sample config ships with; treated as "not configured".
pub const PLACEHOLDER_PROJECT_ID: &str = "placeholder";

pub const DEFAULT_COLLECTION: &str = "users";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_OVERFETCH: usize = 10;
pub const DEFAULT_TOP_LIMIT: usize = 12;
pub const DEFAULT_TOP_FETCH_MULTIPLIER: usize = 2;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub store: StoreConfig,
    pub directory: DirectorySettings,
    pub logging: LoggingConfig,
}

/// Where profile documents come from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend project id; absent, blank or `"placeholder"` means unconfigured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Seed file (JSON or TOML) loaded into the in-memory store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
    /// Collection holding profile documents
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            seed_path: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl StoreConfig {
    /// Whether a real backend project has been configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use agora_core::config::StoreConfig;
    ///
    /// let mut store = StoreConfig::default();
    /// assert!(!store.is_configured());
    /// store.project_id = Some("placeholder".into());
    /// assert!(!store.is_configured());
    /// store.project_id = Some("agora-prod".into());
    /// assert!(store.is_configured());
    /// ```
    pub fn is_configured(&self) -> bool {
        self.project_id
            .as_deref()
            .map(str::trim)
            .is_some_and(|id| !id.is_empty() && id != PLACEHOLDER_PROJECT_ID)
    }
}

/// Paging and ranking knobs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DirectorySettings {
    /// Page size used when a filter does not specify one
    pub default_page_size: usize,
    /// Extra records fetched per page so the recency resort has material
    pub overfetch: usize,
    /// Top-N size used when a caller does not specify one
    pub top_default_limit: usize,
    /// Candidates fetched per requested top-N slot
    pub top_fetch_multiplier: usize,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            overfetch: DEFAULT_OVERFETCH,
            top_default_limit: DEFAULT_TOP_LIMIT,
            top_fetch_multiplier: DEFAULT_TOP_FETCH_MULTIPLIER,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
