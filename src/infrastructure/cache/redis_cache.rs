//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, SlugCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Upper bound for any single cache round-trip. A slow cache degrades to a
/// store read; it must never stall resolution.
const OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Redis cache for slug resolution snapshots.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. All operations are fail-open: errors and timeouts are logged but
/// don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures
    /// the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`SlugCache::set_with_ttl`]
    ///   is called with `ttl_seconds = None`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "slug:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

#[async_trait]
impl SlugCache for RedisCache {
    async fn get(&self, slug: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match timeout(OPERATION_TIMEOUT, conn.get::<_, Option<String>>(&key)).await {
            Ok(Ok(Some(value))) => {
                debug!("Cache HIT: {}", slug);
                Ok(Some(value))
            }
            Ok(Ok(None)) => {
                debug!("Cache MISS: {}", slug);
                Ok(None)
            }
            Ok(Err(e)) => {
                error!("Redis GET error for {}: {}", slug, e);
                Ok(None)
            }
            Err(_) => {
                warn!("Redis GET timed out for {}", slug);
                Ok(None)
            }
        }
    }

    async fn set_with_ttl(
        &self,
        slug: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match timeout(OPERATION_TIMEOUT, conn.set_ex::<_, _, ()>(&key, value, ttl)).await {
            Ok(Ok(_)) => {
                debug!("Cache SET: {} (TTL: {}s)", slug, ttl);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis SET error for {}: {}", slug, e);
                Ok(())
            }
            Err(_) => {
                warn!("Redis SET timed out for {}", slug);
                Ok(())
            }
        }
    }

    async fn delete(&self, slug: &str) -> CacheResult<()> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match timeout(OPERATION_TIMEOUT, conn.del::<_, i32>(&key)).await {
            Ok(Ok(deleted)) => {
                if deleted > 0 {
                    debug!("Cache DEL: {}", slug);
                }
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis DEL error for {}: {}", slug, e);
                Ok(())
            }
            Err(_) => {
                warn!("Redis DEL timed out for {}", slug);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(timeout(OPERATION_TIMEOUT, conn.ping::<()>()).await, Ok(Ok(())))
    }
}
