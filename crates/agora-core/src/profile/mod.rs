//! Profile domain module.
//!
//! This module contains the ranked entity and its conversion from raw store
//! documents.
//!
//! # Module Structure
//!
//! - `model`: `Profile`, `Gender`, `SocialLinks`, `RankedProfile`
//! - `document`: lenient `Document` → `Profile` decoding and stored field names

pub mod document;
mod model;

// Re-export public API
pub use document::{fields, opt_in_filter, parse_timestamp};
pub use model::{
    ANONYMOUS_DISPLAY_NAME, Gender, Profile, RankedProfile, SocialLinks, VERIFIED_BADGE_LEVEL,
};
