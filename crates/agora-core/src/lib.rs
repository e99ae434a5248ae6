//! Voter ranking and directory paging for the Agora polling platform.
//!
//! Profiles live in an external document store. This crate reads them
//! through the [`store::DocumentStore`] port, scores them for the "top"
//! lists and pages through the opted-in voter directory.
//!
//! ```ignore
//! use agora_core::directory::{DirectoryFilter, DirectoryService};
//!
//! let page = service.fetch_page(&DirectoryFilter::default()).await?;
//! ```

pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod profile;
pub mod ranking;
pub mod store;

// Re-export common error type
pub use error::{AgoraError, Result};
