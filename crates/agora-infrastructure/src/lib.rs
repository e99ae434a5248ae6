//! Infrastructure adapters for the Agora directory.
//!
//! - `memory_store`: in-memory `DocumentStore`
//! - `seed`: JSON/TOML seed files
//! - `config_service`: `config.toml` loading
//! - `directory_factory`: `DirectoryService` wiring from configuration

pub mod config_service;
pub mod directory_factory;
pub mod memory_store;
pub mod paths;
pub mod seed;

pub use crate::config_service::ConfigService;
pub use crate::directory_factory::{
    build_directory_service, build_directory_service_with_clock, build_document_store,
};
pub use crate::memory_store::InMemoryDocumentStore;
pub use crate::paths::AgoraPaths;
pub use crate::seed::{SeedFormat, load_seed_file, parse_seed};
