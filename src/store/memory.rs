use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewSearchRecord, SearchRecord};
use crate::store::DocumentStore;

/// In-process document store
///
/// Backs the test suites and local development without a remote store.
/// Implements the same ordering contract as the HTTP client's trending
/// query: count descending, then search term ascending.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    rows: Arc<RwLock<HashMap<String, SearchRecord>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|r| r.search_term == term).cloned())
    }

    async fn create_record(&self, record: NewSearchRecord) -> AppResult<SearchRecord> {
        let created = SearchRecord {
            id: Uuid::new_v4().to_string(),
            search_term: record.search_term,
            count: record.count,
            movie_id: record.movie_id,
            poster_url: record.poster_url,
            created_at: Some(Utc::now()),
        };

        let mut rows = self.rows.write().await;
        rows.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_count(&self, record_id: &str, count: u64) -> AppResult<SearchRecord> {
        let mut rows = self.rows.write().await;
        let record = rows
            .get_mut(record_id)
            .ok_or_else(|| AppError::NotFound(format!("no record with id {}", record_id)))?;
        record.count = count;
        Ok(record.clone())
    }

    async fn query_top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        let rows = self.rows.read().await;
        let mut records: Vec<SearchRecord> = rows.values().cloned().collect();
        records.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        records.truncate(limit);
        Ok(records)
    }
}
