//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkStore;
use crate::error::AppError;

const COLUMNS: &str =
    "slug, destination, created_at, created_by, expire_at, track_clicks, redirect_count, utms";

/// PostgreSQL store for short link records.
///
/// Uses bound parameters throughout; a uniqueness violation on the slug
/// primary key maps to [`AppError::SlugConflict`].
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store backed by a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<ShortLink, sqlx::Error> {
    let utms: Option<sqlx::types::Json<HashMap<String, String>>> = row.try_get("utms")?;

    Ok(ShortLink {
        slug: row.try_get("slug")?,
        destination: row.try_get("destination")?,
        created_at: row.try_get("created_at")?,
        created_by: row.try_get("created_by")?,
        expire_at: row.try_get("expire_at")?,
        track_clicks: row.try_get("track_clicks")?,
        redirect_count: row.try_get("redirect_count")?,
        utms: utms.map(|json| json.0),
    })
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM short_links WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO short_links (slug, destination, created_by, expire_at, track_clicks, utms)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&new_link.slug)
        .bind(&new_link.destination)
        .bind(&new_link.created_by)
        .bind(new_link.expire_at)
        .bind(new_link.track_clicks)
        .bind(new_link.utms.map(sqlx::types::Json))
        .fetch_one(self.pool.as_ref())
        .await?;

        map_row(&row).map_err(Into::into)
    }

    async fn increment_redirect_count(&self, slug: &str) -> Result<(), AppError> {
        // Arithmetic increment at the store; concurrent clicks cannot lose
        // updates the way a read-then-write would.
        sqlx::query("UPDATE short_links SET redirect_count = redirect_count + 1 WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        page: i64,
        page_size: i64,
        include_expired: bool,
    ) -> Result<Vec<ShortLink>, AppError> {
        let offset = (page - 1) * page_size;

        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS} FROM short_links
            WHERE created_by = $1
              AND ($2::boolean OR expire_at IS NULL OR expire_at > NOW())
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(owner)
        .bind(include_expired)
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(map_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
