//! Document store domain module.
//!
//! This module defines the abstract document store that profiles are read
//! from, together with the query and cursor types it speaks.
//!
//! # Module Structure
//!
//! - `model`: `Document`, `FieldFilter`, `DocumentQuery`, `Cursor`, `QueryBatch`
//! - `repository`: the `DocumentStore` trait
//!
//! # Usage
//!
//! ```ignore
//! use agora_core::store::{DocumentQuery, DocumentStore, FieldFilter};
//! ```

mod model;
pub mod repository;

// Re-export public API
pub use model::{Cursor, Document, DocumentQuery, FieldFilter, QueryBatch};
pub use repository::DocumentStore;
