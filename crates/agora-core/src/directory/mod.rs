//! Voter directory module.
//!
//! Paginated, recency-sorted listing of opted-in profiles plus the "top
//! voters" and "top politicians" rankings.
//!
//! # Module Structure
//!
//! - `model`: `DirectoryFilter`, `GenderFilter`, `ProfileTypeFilter`, `Page`
//! - `service`: `DirectoryService`

mod model;
mod service;

// Re-export public API
pub use model::{DirectoryFilter, GenderFilter, Page, ProfileTypeFilter};
pub use service::DirectoryService;
