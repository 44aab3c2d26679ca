use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Document store endpoint (Appwrite-compatible REST API)
    #[serde(default = "default_store_endpoint")]
    pub store_endpoint: String,

    /// Document store project identifier
    pub store_project_id: String,

    /// Document store API key
    pub store_api_key: String,

    /// Database holding the search-count collection
    pub store_database_id: String,

    /// Collection holding the search-count records
    pub store_collection_id: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Base URL for poster images; a record's poster URL is this base
    /// with the result's poster path appended
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Number of trending entries returned when the caller gives no limit
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_store_endpoint() -> String {
    "https://nyc.cloud.appwrite.io/v1".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_trending_limit() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = envy::from_iter::<_, Config>(vec![
            ("STORE_PROJECT_ID".to_string(), "proj".to_string()),
            ("STORE_API_KEY".to_string(), "key".to_string()),
            ("STORE_DATABASE_ID".to_string(), "db".to_string()),
            ("STORE_COLLECTION_ID".to_string(), "metrics".to_string()),
        ])
        .unwrap();

        assert_eq!(config.store_endpoint, "https://nyc.cloud.appwrite.io/v1");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.poster_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_config_missing_required_field() {
        let result = envy::from_iter::<_, Config>(vec![(
            "STORE_PROJECT_ID".to_string(),
            "proj".to_string(),
        )]);
        assert!(result.is_err());
    }
}
