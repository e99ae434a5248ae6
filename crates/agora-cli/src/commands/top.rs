use super::utils::print_json;
use agora_core::directory::DirectoryService;
use anyhow::{Context, Result};

pub async fn run(
    service: &DirectoryService,
    politicians: bool,
    limit: Option<usize>,
) -> Result<()> {
    let ranked = if politicians {
        service.fetch_top_politicians(limit).await
    } else {
        service.fetch_top_voters(limit).await
    }
    .context("Failed to rank profiles")?;
    print_json(&ranked)
}
