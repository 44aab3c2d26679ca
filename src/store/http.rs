/// HTTP document store client
///
/// Speaks the Appwrite-compatible REST protocol: records live as rows in
/// one collection, filtered and ordered with JSON-encoded query objects.
/// Project and key credentials travel as headers on every request.
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{NewSearchRecord, SearchRecord};
use crate::store::DocumentStore;

/// List envelope returned by the store's document queries
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[allow(dead_code)]
    total: u64,
    documents: Vec<SearchRecord>,
}

#[derive(Clone)]
pub struct HttpDocumentStore {
    http_client: HttpClient,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
}

impl HttpDocumentStore {
    /// Creates a client for the collection named in the configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint: config.store_endpoint.clone(),
            project_id: config.store_project_id.clone(),
            api_key: config.store_api_key.clone(),
            database_id: config.store_database_id.clone(),
            collection_id: config.store_collection_id.clone(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    fn document_url(&self, record_id: &str) -> String {
        format!("{}/{}", self.documents_url(), record_id)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    /// Maps non-success responses to store errors, keeping the body for context
    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "document store returned status {}: {}",
                status, body
            )));
        }
        Err(AppError::StoreUnavailable(format!(
            "document store returned status {}: {}",
            status, body
        )))
    }

    fn query_equal(attribute: &str, value: &str) -> String {
        json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
    }

    fn query_order_desc(attribute: &str) -> String {
        json!({ "method": "orderDesc", "attribute": attribute }).to_string()
    }

    fn query_limit(limit: usize) -> String {
        json!({ "method": "limit", "values": [limit] }).to_string()
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>> {
        let response = self
            .request(reqwest::Method::GET, self.documents_url())
            .query(&[
                ("queries[]", Self::query_equal("searchTerm", term)),
                ("queries[]", Self::query_limit(1)),
            ])
            .send()
            .await?;

        let list: DocumentList = Self::check(response).await?.json().await?;

        tracing::debug!(term = %term, found = !list.documents.is_empty(), "Record lookup completed");

        Ok(list.documents.into_iter().next())
    }

    async fn create_record(&self, record: NewSearchRecord) -> AppResult<SearchRecord> {
        let response = self
            .request(reqwest::Method::POST, self.documents_url())
            .json(&json!({
                "documentId": "unique()",
                "data": record,
            }))
            .send()
            .await?;

        let created: SearchRecord = Self::check(response).await?.json().await?;

        tracing::debug!(term = %created.search_term, id = %created.id, "Record created");

        Ok(created)
    }

    async fn update_count(&self, record_id: &str, count: u64) -> AppResult<SearchRecord> {
        let response = self
            .request(reqwest::Method::PATCH, self.document_url(record_id))
            .json(&json!({
                "data": { "count": count },
            }))
            .send()
            .await?;

        let updated: SearchRecord = Self::check(response).await?.json().await?;

        tracing::debug!(id = %record_id, count = count, "Record count updated");

        Ok(updated)
    }

    async fn query_top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .request(reqwest::Method::GET, self.documents_url())
            .query(&[
                ("queries[]", Self::query_order_desc("count")),
                ("queries[]", Self::query_limit(limit)),
            ])
            .send()
            .await?;

        let list: DocumentList = Self::check(response).await?.json().await?;

        tracing::debug!(limit = limit, results = list.documents.len(), "Trending query completed");

        Ok(list.documents)
    }
}
