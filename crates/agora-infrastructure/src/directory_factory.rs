//! Wiring of `DirectoryService` from configuration.

use crate::memory_store::InMemoryDocumentStore;
use crate::paths::AgoraPaths;
use crate::seed::load_seed_file;
use agora_core::clock::{Clock, SystemClock};
use agora_core::config::{RootConfig, StoreConfig};
use agora_core::directory::DirectoryService;
use agora_core::error::Result;
use agora_core::store::DocumentStore;
use std::sync::Arc;

/// Builds the document store described by `config`.
///
/// - an explicit `seed_path` always yields an in-memory store loaded from it
/// - a configured project without a seed path loads the default seed file
///   when present, otherwise starts from an empty in-memory store
/// - otherwise the store is unconfigured and `None` is returned
pub async fn build_document_store(config: &StoreConfig) -> Result<Option<Arc<dyn DocumentStore>>> {
    if let Some(seed_path) = &config.seed_path {
        let store: Arc<dyn DocumentStore> =
            Arc::new(load_seed_file(seed_path, &config.collection).await?);
        return Ok(Some(store));
    }

    if !config.is_configured() {
        tracing::info!("Document store not configured, directory reads will be empty");
        return Ok(None);
    }

    match AgoraPaths::default_seed_file() {
        Ok(path) if path.exists() => {
            let store: Arc<dyn DocumentStore> =
                Arc::new(load_seed_file(&path, &config.collection).await?);
            Ok(Some(store))
        }
        _ => {
            tracing::warn!(
                project_id = config.project_id.as_deref().unwrap_or_default(),
                "No seed data found, starting with an empty document store"
            );
            let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
            Ok(Some(store))
        }
    }
}

/// Builds a `DirectoryService` using the system clock.
pub async fn build_directory_service(config: &RootConfig) -> Result<DirectoryService> {
    build_directory_service_with_clock(config, Arc::new(SystemClock)).await
}

/// Builds a `DirectoryService` with an explicit clock.
pub async fn build_directory_service_with_clock(
    config: &RootConfig,
    clock: Arc<dyn Clock>,
) -> Result<DirectoryService> {
    let store = build_document_store(&config.store).await?;
    Ok(DirectoryService::new(store, clock)
        .with_collection(config.store.collection.clone())
        .with_settings(config.directory.clone()))
}
