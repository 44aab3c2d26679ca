use std::sync::Arc;

use crate::cache::{Cache, CacheKey};
use crate::error::{AppError, AppResult};
use crate::models::{NewSearchRecord, SearchRecord, TopResult};
use crate::store::DocumentStore;

/// Trending results are cached briefly; there is no invalidation on
/// write, so a new search can take up to this long to surface.
const TRENDING_CACHE_TTL: u64 = 60;

/// Tracks how often each search term completes with results
///
/// A stateless façade over the document store: one record per term,
/// created on the first occurrence and incremented on every later one.
/// The record keeps the top result of the *first* search (first write
/// wins); later searches never change it.
///
/// Popularity tracking is an auxiliary feature. The public operations
/// never fail: `record_occurrence` and `get_trending` log store errors
/// and degrade (drop the occurrence, return an empty list). The `try_`
/// variants expose the underlying results for callers that care.
pub struct PopularityLedger {
    store: Arc<dyn DocumentStore>,
    cache: Option<Cache>,
    poster_base_url: String,
}

impl PopularityLedger {
    pub fn new(store: Arc<dyn DocumentStore>, cache: Option<Cache>, poster_base_url: String) -> Self {
        Self {
            store,
            cache,
            poster_base_url,
        }
    }

    /// Records one occurrence of a completed search, best effort
    ///
    /// Failures are logged and swallowed; a lost occurrence must never
    /// disturb the caller's search flow.
    pub async fn record_occurrence(&self, term: &str, top_result: &TopResult) {
        if let Err(e) = self.try_record_occurrence(term, top_result).await {
            tracing::warn!(term = %term, error = %e, "Search count update failed");
        }
    }

    /// Records one occurrence, surfacing any failure
    ///
    /// Looks the term up and either increments the existing record's
    /// count or creates a fresh record with count 1 and the top result's
    /// id and poster URL. Exactly one write per successful call.
    ///
    /// The lookup and the write are two store round trips with no
    /// atomicity between them: two concurrent calls for the same term
    /// can both read the same count and one increment is lost. Accepted
    /// undercounting; a store-side atomic increment would close it.
    pub async fn try_record_occurrence(&self, term: &str, top_result: &TopResult) -> AppResult<()> {
        if term.is_empty() {
            return Err(AppError::InvalidInput(
                "search term must not be empty".to_string(),
            ));
        }
        top_result.validate()?;

        match self.store.find_by_term(term).await? {
            Some(existing) => {
                self.store
                    .update_count(&existing.id, existing.count + 1)
                    .await?;
                tracing::debug!(term = %term, count = existing.count + 1, "Search count incremented");
            }
            None => {
                let created = self
                    .store
                    .create_record(NewSearchRecord {
                        search_term: term.to_string(),
                        count: 1,
                        movie_id: top_result.id,
                        poster_url: top_result.poster_url(&self.poster_base_url),
                    })
                    .await?;
                tracing::debug!(term = %term, id = %created.id, "Search count record created");
            }
        }

        Ok(())
    }

    /// Returns the most-searched records, best effort
    ///
    /// Query failures are logged and yield an empty list, never stale
    /// data or an error.
    pub async fn get_trending(&self, limit: usize) -> Vec<SearchRecord> {
        match self.try_get_trending(limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(limit = limit, error = %e, "Trending query failed");
                Vec::new()
            }
        }
    }

    /// Returns up to `limit` records ranked by count, surfacing failures
    ///
    /// Ordering is deterministic: count descending, ties broken by
    /// search term ascending. The re-sort here pins the tie order even
    /// when the backing store returns ties in arbitrary order within
    /// the page it selected.
    pub async fn try_get_trending(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let key = CacheKey::Trending(limit);

        // A broken cache falls through to the store.
        if let Some(cache) = &self.cache {
            match cache.get_from_cache::<Vec<SearchRecord>>(&key).await {
                Ok(Some(hit)) => return Ok(hit),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Trending cache read failed"),
            }
        }

        let mut records = self.store.query_top_by_count(limit).await?;
        records.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.search_term.cmp(&b.search_term))
        });

        if let Some(cache) = &self.cache {
            cache.set_in_background(&key, &records, TRENDING_CACHE_TTL);
        }

        Ok(records)
    }
}
