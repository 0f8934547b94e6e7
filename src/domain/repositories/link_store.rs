//! Store trait for short link persistence.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable slug → record mapping; the source of truth for resolution.
///
/// Implementations must enforce a uniqueness constraint on `slug`. Service
/// pre-checks are only an optimization; a concurrent allocation racing for the
/// same slug must fail at insert time with [`AppError::SlugConflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL store
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-memory store
///   for tests and database-free development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Looks up a record by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError>;

    /// Inserts a new record with a zero redirect count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if the slug is already taken
    /// (uniqueness violation) and [`AppError::Store`] on other failures.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Atomically increments the record's redirect counter.
    ///
    /// The increment happens at the store (`count = count + 1`), never as a
    /// read-modify-write, so concurrent clicks cannot lose updates. A missing
    /// slug is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn increment_redirect_count(&self, slug: &str) -> Result<(), AppError>;

    /// Lists an owner's records, newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    /// - `include_expired` - When false, records with a past expiry are skipped
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store failures.
    async fn list_by_owner(
        &self,
        owner: &str,
        page: i64,
        page_size: i64,
        include_expired: bool,
    ) -> Result<Vec<ShortLink>, AppError>;

    /// Reports whether the store backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
