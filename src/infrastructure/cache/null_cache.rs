//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, SlugCache};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. All
/// operations succeed immediately without storing or retrieving data, so
/// every resolution takes the store path.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlugCache for NullCache {
    async fn get(&self, _slug: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_with_ttl(
        &self,
        _slug: &str,
        _value: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _slug: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
