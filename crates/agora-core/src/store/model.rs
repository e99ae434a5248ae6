//! Document store query models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single record returned by the document store.
///
/// Records are opaque key-value documents. The store assigns `id` at
/// creation time and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier
    pub id: String,
    /// Field values keyed by field name
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Document {
    /// Creates a document from an id and a field map.
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns the raw value of a field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Returns true when every equality filter matches this document.
    ///
    /// A filter on a missing field never matches.
    pub fn matches(&self, filters: &[FieldFilter]) -> bool {
        filters.iter().all(|f| f.matches(self))
    }
}

/// An equality constraint on a single document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    /// Creates an equality filter `field == value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Checks this filter against a document.
    pub fn matches(&self, document: &Document) -> bool {
        document.field(&self.field) == Some(&self.value)
    }
}

/// Opaque pagination token.
///
/// A cursor marks a position in the store's native fetch order. It is only
/// meaningful together with the filter set of the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// A bounded query against one collection.
///
/// Built with a small builder API:
///
/// ```
/// use agora_core::store::{DocumentQuery, FieldFilter};
///
/// let query = DocumentQuery::new("users")
///     .filter(FieldFilter::eq("is_directory_opt_in", true))
///     .limit(30);
/// assert_eq!(query.limit, 30);
/// assert_eq!(query.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Collection to read from
    pub collection: String,
    /// Equality constraints, all of which must hold
    pub filters: Vec<FieldFilter>,
    /// Field the store may order by, if it can do so without extra indexes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_hint: Option<String>,
    /// Maximum number of documents to return
    pub limit: usize,
    /// Continue after this position in native order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after: Option<Cursor>,
}

impl DocumentQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_hint: None,
            limit: usize::MAX,
            start_after: None,
        }
    }

    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = FieldFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn order_hint(mut self, field: impl Into<String>) -> Self {
        self.order_hint = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn start_after(mut self, cursor: Option<Cursor>) -> Self {
        self.start_after = cursor;
        self
    }
}

/// The result of one store query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBatch {
    /// Documents in the store's native order
    pub documents: Vec<Document>,
    /// Position of the last returned document, absent when the batch is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cursor: Option<Cursor>,
}

impl QueryBatch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn test_filter_matches_exact_value() {
        let d = doc("a", json!({ "is_politician": true, "gender": "female" }));
        assert!(d.matches(&[FieldFilter::eq("is_politician", true)]));
        assert!(d.matches(&[
            FieldFilter::eq("is_politician", true),
            FieldFilter::eq("gender", "female"),
        ]));
        assert!(!d.matches(&[FieldFilter::eq("gender", "male")]));
    }

    #[test]
    fn test_filter_on_missing_field_does_not_match() {
        let d = doc("a", json!({ "gender": "male" }));
        assert!(!d.matches(&[FieldFilter::eq("is_politician", false)]));
    }

    #[test]
    fn test_cursor_serializes_as_plain_string() {
        let cursor = Cursor::new("user-42");
        assert_eq!(serde_json::to_string(&cursor).unwrap(), "\"user-42\"");
    }
}
