//! Seed file loading.
//!
//! A seed file describes the documents of one or more collections. JSON and
//! TOML are accepted; both are normalised to `serde_json::Value` first.
//!
//! Accepted layouts:
//!
//! ```text
//! { "users": [ { "id": "u1", ... }, ... ] }      # collection => array
//! { "users": { "u1": { ... }, "u2": { ... } } }  # collection => id map (export style)
//! [ { "id": "u1", ... }, ... ]                    # bare array => default collection
//! ```
//!
//! Array entries without an `id` get a random one, like documents created
//! with an auto-generated id.

use crate::memory_store::InMemoryDocumentStore;
use agora_core::error::{AgoraError, Result};
use agora_core::store::Document;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// Seed file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Toml,
}

impl SeedFormat {
    /// Picks the format from the file extension (`.toml` => TOML, otherwise JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// A document destined for a named collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedDocument {
    pub collection: String,
    pub document: Document,
}

/// Parses seed content into documents.
pub fn parse_seed(
    content: &str,
    format: SeedFormat,
    default_collection: &str,
) -> Result<Vec<SeedDocument>> {
    let root = match format {
        SeedFormat::Json => serde_json::from_str::<JsonValue>(content)?,
        SeedFormat::Toml => toml_to_json(toml::from_str::<toml::Value>(content)?)?,
    };

    let mut seeded = Vec::new();
    match root {
        JsonValue::Array(entries) => {
            collect_array(default_collection, entries, &mut seeded)?;
        }
        JsonValue::Object(collections) => {
            for (collection, entries) in collections {
                match entries {
                    JsonValue::Array(entries) => collect_array(&collection, entries, &mut seeded)?,
                    JsonValue::Object(by_id) => collect_id_map(&collection, by_id, &mut seeded)?,
                    _ => {
                        return Err(AgoraError::invalid_input(format!(
                            "seed collection '{}' must be an array or an object",
                            collection
                        )));
                    }
                }
            }
        }
        _ => {
            return Err(AgoraError::invalid_input(
                "seed root must be an array or an object of collections",
            ));
        }
    }

    Ok(seeded)
}

/// Reads a seed file and loads it into a fresh in-memory store.
pub async fn load_seed_file(
    path: &Path,
    default_collection: &str,
) -> Result<InMemoryDocumentStore> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AgoraError::io(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;

    let documents = parse_seed(&content, SeedFormat::from_path(path), default_collection)?;
    let store = InMemoryDocumentStore::new();
    let count = documents.len();
    for seeded in documents {
        store.upsert(&seeded.collection, seeded.document).await;
    }

    tracing::info!(path = %path.display(), documents = count, "Loaded seed file");
    Ok(store)
}

fn collect_array(
    collection: &str,
    entries: Vec<JsonValue>,
    out: &mut Vec<SeedDocument>,
) -> Result<()> {
    for entry in entries {
        let JsonValue::Object(mut data) = entry else {
            return Err(AgoraError::invalid_input(format!(
                "seed entries in '{}' must be objects",
                collection
            )));
        };
        let id = match data.remove("id") {
            Some(JsonValue::String(id)) if !id.trim().is_empty() => id,
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        out.push(SeedDocument {
            collection: collection.to_string(),
            document: Document::new(id, data),
        });
    }
    Ok(())
}

fn collect_id_map(
    collection: &str,
    by_id: Map<String, JsonValue>,
    out: &mut Vec<SeedDocument>,
) -> Result<()> {
    for (id, entry) in by_id {
        let JsonValue::Object(data) = entry else {
            return Err(AgoraError::invalid_input(format!(
                "seed document '{}/{}' must be an object",
                collection, id
            )));
        };
        out.push(SeedDocument {
            collection: collection.to_string(),
            document: Document::new(id, data),
        });
    }
    Ok(())
}

/// Converts a toml::Value to serde_json::Value.
///
/// TOML datetimes become RFC 3339 strings, which profile decoding accepts.
fn toml_to_json(toml_value: toml::Value) -> Result<JsonValue> {
    Ok(match toml_value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Table(table) => {
            let mut map = Map::new();
            for (key, value) in table {
                map.insert(key, toml_to_json(value)?);
            }
            JsonValue::Object(map)
        }
    })
}
