use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier profile cache
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Both tiers hold JSON and expire after the same TTL. The Redis connection
/// is multiplexed; each call works on its own clone of the handle.
pub struct CacheManager {
    redis: ConnectionManager,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis,
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value, L1 first, then L2. `None` on a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }

        let mut conn = self.redis.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await?;

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let parsed = serde_json::from_str(&json)?;
                // Populate L1
                self.l1_cache.insert(key.to_string(), json.into_bytes()).await;
                Ok(Some(parsed))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Set a value in both tiers
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        let mut conn = self.redis.clone();
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut conn)
            .await?;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }
}
