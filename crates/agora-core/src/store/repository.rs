//! Document store trait.
//!
//! Defines the interface the directory uses to read profile documents.

use super::model::{Document, DocumentQuery, QueryBatch};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract, read-only view of a document database.
///
/// This trait decouples ranking and paging from the concrete backend
/// (a managed document database, an in-memory fixture, a seed file).
///
/// # Implementation Notes
///
/// Implementations should:
/// - Return documents in a stable native order (e.g. by document id)
/// - Apply every equality filter in the query
/// - Resume strictly after `start_after` when it is supplied
/// - Report an absent or unconfigured backend as `AgoraError::StoreUnavailable`
///   and network/timeout trouble as `AgoraError::TransientFetch`
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs a bounded equality query.
    ///
    /// # Returns
    ///
    /// - `Ok(QueryBatch)`: up to `query.limit` documents plus the cursor of the last one
    /// - `Err(_)`: the store could not answer
    async fn query(&self, query: &DocumentQuery) -> Result<QueryBatch>;

    /// Fetches a single document by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Document))`: Document found
    /// - `Ok(None)`: Document not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;
}
