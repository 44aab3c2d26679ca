/// Document store abstraction
///
/// The ledger persists to a remote document collection. This seam keeps
/// the ledger independent of the concrete backend: production uses the
/// HTTP client, tests use the in-memory store or a mock.
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::AppResult;
use crate::models::{NewSearchRecord, SearchRecord};

pub mod http;
pub mod memory;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Operations the ledger needs from the backing document store
///
/// Each operation is individually atomic on the store side, but nothing
/// makes a find-then-write pair atomic as a whole; callers that compose
/// them inherit that gap.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Looks up the record keyed by the given search term
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>>;

    /// Creates a new record and returns it with its store-assigned id
    async fn create_record(&self, record: NewSearchRecord) -> AppResult<SearchRecord>;

    /// Overwrites the count of an existing record
    async fn update_count(&self, record_id: &str, count: u64) -> AppResult<SearchRecord>;

    /// Returns up to `limit` records with the highest counts, descending
    async fn query_top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>>;
}
