//! In-memory DocumentStore implementation.
//!
//! Backs the CLI when a seed file is configured, and serves as the fixture
//! store in tests. Native order is ascending document id, matching the
//! default ordering of managed document databases.

use agora_core::error::Result;
use agora_core::store::{Cursor, Document, DocumentQuery, DocumentStore, QueryBatch};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use tokio::sync::RwLock;

type Collection = BTreeMap<String, Map<String, Value>>;

/// Thread-safe in-memory document store.
///
/// Structure:
/// ```text
/// collections
/// └── "users"
///     ├── "id-a" => { ...fields }
///     └── "id-b" => { ...fields }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `documents` in `collection`.
    pub fn with_documents(collection: &str, documents: impl IntoIterator<Item = Document>) -> Self {
        let mut docs = Collection::new();
        for document in documents {
            docs.insert(document.id, document.data);
        }
        let mut collections = HashMap::new();
        collections.insert(collection.to_string(), docs);
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Inserts or replaces a document.
    pub async fn upsert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(document.id, document.data);
    }

    /// Removes a document, returning whether it existed.
    pub async fn remove(&self, collection: &str, id: &str) -> bool {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some()
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(|docs| docs.len()).unwrap_or(0)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query(&self, query: &DocumentQuery) -> Result<QueryBatch> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(QueryBatch::empty());
        };

        if let Some(hint) = &query.order_hint {
            tracing::trace!(order_hint = %hint, "In-memory store ignores order hints");
        }

        let lower = match &query.start_after {
            Some(cursor) => Bound::Excluded(cursor.as_str().to_string()),
            None => Bound::Unbounded,
        };

        let documents: Vec<Document> = docs
            .range((lower, Bound::Unbounded))
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .filter(|document| document.matches(&query.filters))
            .take(query.limit)
            .collect();

        let last_cursor = documents.last().map(|d| Cursor::new(d.id.clone()));
        Ok(QueryBatch {
            documents,
            last_cursor,
        })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document::new(id, data.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::store::FieldFilter;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test documents must be objects"),
        }
    }

    fn create_test_store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::with_documents(
            "users",
            vec![
                doc("c", json!({ "is_directory_opt_in": true, "is_politician": false })),
                doc("a", json!({ "is_directory_opt_in": true, "is_politician": true })),
                doc("d", json!({ "is_directory_opt_in": false })),
                doc("b", json!({ "is_directory_opt_in": true, "is_politician": false })),
            ],
        )
    }

    #[tokio::test]
    async fn test_query_returns_documents_in_id_order() {
        let store = create_test_store();
        let batch = store.query(&DocumentQuery::new("users")).await.unwrap();
        let ids: Vec<&str> = batch.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(batch.last_cursor, Some(Cursor::new("d")));
    }

    #[tokio::test]
    async fn test_query_applies_filters_and_limit() {
        let store = create_test_store();
        let query = DocumentQuery::new("users")
            .filter(FieldFilter::eq("is_directory_opt_in", true))
            .filter(FieldFilter::eq("is_politician", false))
            .limit(1);
        let batch = store.query(&query).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.documents[0].id, "b");
    }

    #[tokio::test]
    async fn test_query_resumes_after_cursor() {
        let store = create_test_store();
        let query = DocumentQuery::new("users")
            .filter(FieldFilter::eq("is_directory_opt_in", true))
            .start_after(Some(Cursor::new("a")));
        let batch = store.query(&query).await.unwrap();
        let ids: Vec<&str> = batch.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = create_test_store();
        let batch = store.query(&DocumentQuery::new("polls")).await.unwrap();
        assert!(batch.is_empty());
        assert!(batch.last_cursor.is_none());
    }

    #[tokio::test]
    async fn test_upsert_get_and_remove() {
        let store = InMemoryDocumentStore::new();
        assert!(store.is_empty("users").await);

        store
            .upsert("users", doc("x", json!({ "display_name": "X" })))
            .await;
        let found = store.get("users", "x").await.unwrap().unwrap();
        assert_eq!(found.field("display_name"), Some(&json!("X")));

        assert!(store.remove("users", "x").await);
        assert!(store.get("users", "x").await.unwrap().is_none());
        assert!(!store.remove("users", "x").await);
    }
}
