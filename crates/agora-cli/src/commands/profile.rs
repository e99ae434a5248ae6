use super::utils::print_json;
use agora_core::AgoraError;
use agora_core::directory::DirectoryService;
use anyhow::{Context, Result};

pub async fn run(service: &DirectoryService, id: &str) -> Result<()> {
    let profile = service
        .fetch_profile(id)
        .await
        .with_context(|| format!("Failed to look up profile {}", id))?
        .ok_or_else(|| AgoraError::not_found("profile", id))?;
    print_json(&profile)
}
