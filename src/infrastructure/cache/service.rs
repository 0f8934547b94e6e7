//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// This is the recoverable "cache unavailable" class: every call site
/// swallows it and degrades to a store read.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching slug resolution snapshots.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application: cache failures degrade to store lookups, and a
/// write failure must never fail the operation that triggered it.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugCache: Send + Sync {
    /// Retrieves the raw cached value for a slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open behavior)
    async fn get(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores a value for a slug with a TTL.
    ///
    /// `ttl_seconds = None` uses the implementation's default TTL.
    ///
    /// # Errors
    ///
    /// Production implementations should log failures and return `Ok(())`
    /// rather than propagate them.
    async fn set_with_ttl(
        &self,
        slug: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached value.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn delete(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
