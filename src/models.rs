use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One persisted search-count record
///
/// Wire field names match the document store's collection schema:
/// `$id`/`$createdAt` are store-managed, `searchTerm` is the unique
/// natural key, and `movie_id`/`poster_url` describe the top result of
/// the *first* search for the term. Only `count` ever changes after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    /// Store-assigned row identifier
    #[serde(rename = "$id")]
    pub id: String,

    /// The search term exactly as typed (case-sensitive)
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    /// Occurrences of a completed search for this term, always >= 1
    pub count: u64,

    /// Identifier of the top result from the first recorded search
    pub movie_id: u64,

    /// Display URL for that result's poster, fixed at creation
    pub poster_url: String,

    /// Store-assigned creation timestamp
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new search-count record
#[derive(Debug, Clone, Serialize)]
pub struct NewSearchRecord {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
}

/// The top-ranked result of a completed search, as reported by the caller
///
/// The ledger has no knowledge of how the metadata source ranked its
/// results; it only needs an identifier and a poster path fragment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopResult {
    pub id: u64,
    pub poster_path: String,
}

impl TopResult {
    /// Checks that the result carries a usable identifier and poster path
    pub fn validate(&self) -> AppResult<()> {
        if self.id == 0 {
            return Err(AppError::MalformedResult(
                "top result is missing a movie id".to_string(),
            ));
        }
        if self.poster_path.is_empty() {
            return Err(AppError::MalformedResult(
                "top result is missing a poster path".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the display URL by appending the poster path to the image base
    pub fn poster_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.poster_path)
    }
}
