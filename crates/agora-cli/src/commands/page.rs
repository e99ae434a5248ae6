use super::utils::print_json;
use agora_core::directory::{DirectoryFilter, DirectoryService, GenderFilter, ProfileTypeFilter};
use agora_core::store::Cursor;
use anyhow::{Context, Result};

pub async fn run(
    service: &DirectoryService,
    gender: GenderFilter,
    profile_type: ProfileTypeFilter,
    page_size: Option<usize>,
    cursor: Option<String>,
) -> Result<()> {
    let mut filter = DirectoryFilter::default()
        .with_gender(gender)
        .with_profile_type(profile_type)
        .with_cursor(cursor.map(Cursor::new));
    if let Some(page_size) = page_size {
        filter = filter.with_page_size(page_size);
    }

    let page = service
        .fetch_page(&filter)
        .await
        .context("Failed to fetch directory page")?;
    print_json(&page)
}
