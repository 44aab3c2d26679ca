use std::fmt::Display;

use redis::{AsyncCommands, Client};
use tokio::sync::mpsc;

use crate::error::AppResult;

/// Keys under which ledger reads are cached
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Trending query result for a given limit
    Trending(usize),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Trending(limit) => write!(f, "trending:{}", limit),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Message for asynchronous cache writes
struct CacheWriteMessage {
    key: String,
    value: String,
    ttl: u64,
}

/// Redis-backed cache for trending reads
///
/// Writes are fire-and-forget: they are handed to a background task over
/// a channel so a slow Redis never delays a response. The task drains
/// any buffered writes and exits once every `Cache` clone is dropped.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    write_tx: mpsc::UnboundedSender<CacheWriteMessage>,
}

impl Cache {
    /// Creates a new cache and spawns its background writer task
    pub fn new(redis_client: Client) -> Self {
        let (write_tx, write_rx) = mpsc::unbounded_channel();

        let client = redis_client.clone();
        tokio::spawn(async move {
            Self::writer_task(client, write_rx).await;
        });

        Self {
            redis_client,
            write_tx,
        }
    }

    /// Processes queued cache writes until the channel closes
    async fn writer_task(client: Client, mut write_rx: mpsc::UnboundedReceiver<CacheWriteMessage>) {
        tracing::debug!("Cache writer task started");

        while let Some(msg) = write_rx.recv().await {
            if let Err(e) = Self::write_to_redis(&client, msg).await {
                tracing::error!(error = %e, "Failed to write to Redis cache");
            }
        }

        tracing::debug!("Cache writer task stopped");
    }

    /// Writes a single entry to Redis with its TTL
    async fn write_to_redis(client: &Client, msg: CacheWriteMessage) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(msg.key, msg.value, msg.ttl).await?;
        Ok(())
    }

    /// Retrieves a cached value by key, `None` on a miss
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(format!("{}", key)).await?;

        match cached {
            Some(json) => {
                let data = serde_json::from_str(&json).map_err(|e| {
                    crate::error::AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value in the cache without waiting for the write
    ///
    /// Serialization or channel errors are logged and dropped; a failed
    /// cache fill only means the next read goes to the store again.
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let msg = CacheWriteMessage {
            key: format!("{}", key),
            value: json,
            ttl,
        };

        if let Err(e) = self.write_tx.send(msg) {
            tracing::error!(error = %e, "Failed to send cache write message");
        }
    }
}
