use std::sync::Arc;

use crate::services::PopularityLedger;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<PopularityLedger>,
    /// Trending limit applied when the request names none
    pub default_trending_limit: usize,
}

impl AppState {
    pub fn new(ledger: Arc<PopularityLedger>, default_trending_limit: usize) -> Self {
        Self {
            ledger,
            default_trending_limit,
        }
    }
}
