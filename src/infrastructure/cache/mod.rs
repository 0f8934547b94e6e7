//! Caching layer for fast slug resolution.
//!
//! Provides a [`SlugCache`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! The cache is best-effort acceleration, never authoritative: values carry a
//! TTL independent of any record expiry, and resolution re-checks expiry on
//! every read. Cached values decode through [`CachedValue`], which falls back
//! to treating a non-JSON value as a bare destination.

mod null_cache;
mod redis_cache;
mod service;
mod snapshot;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, SlugCache};
pub use snapshot::{CachedValue, SlugSnapshot};

#[cfg(test)]
pub use service::MockSlugCache;
