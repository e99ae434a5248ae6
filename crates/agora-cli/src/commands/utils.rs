use agora_core::config::RootConfig;
use agora_core::directory::DirectoryService;
use agora_infrastructure::{ConfigService, build_directory_service};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Loads a config file named on the command line.
///
/// Unlike the default location, an explicit file must exist and parse.
pub fn load_explicit_config(path: &Path) -> Result<RootConfig> {
    anyhow::ensure!(path.exists(), "Config file not found: {}", path.display());
    ConfigService::with_path(path)
        .try_get_config()
        .with_context(|| format!("Failed to load config file {}", path.display()))
}

pub async fn build_service(config: &RootConfig) -> Result<DirectoryService> {
    let service = build_directory_service(config)
        .await
        .context("Failed to set up the document store")?;
    if !service.is_configured() {
        tracing::warn!("Document store not configured; pass --seed or set store.seed_path");
    }
    Ok(service)
}

/// Writes `value` to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
