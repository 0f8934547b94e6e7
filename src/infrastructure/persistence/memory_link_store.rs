//! In-memory implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkStore;
use crate::error::AppError;

/// In-memory store for tests and database-free development.
///
/// Mirrors the PostgreSQL store's semantics: insert-only uniqueness on the
/// slug (expired records keep their slug taken, since records are never
/// deleted) and arithmetic counter increments under the write lock.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<String, ShortLink>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.read().await.get(slug).cloned())
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.slug) {
            return Err(AppError::slug_conflict(
                "Slug already exists",
                json!({ "slug": new_link.slug }),
            ));
        }

        let link = ShortLink {
            slug: new_link.slug,
            destination: new_link.destination,
            created_at: Utc::now(),
            created_by: new_link.created_by,
            expire_at: new_link.expire_at,
            track_clicks: new_link.track_clicks,
            redirect_count: 0,
            utms: new_link.utms,
        };

        links.insert(link.slug.clone(), link.clone());
        Ok(link)
    }

    async fn increment_redirect_count(&self, slug: &str) -> Result<(), AppError> {
        let mut links = self.links.write().await;

        if let Some(link) = links.get_mut(slug) {
            link.redirect_count += 1;
        }

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        page: i64,
        page_size: i64,
        include_expired: bool,
    ) -> Result<Vec<ShortLink>, AppError> {
        let links = self.links.read().await;

        let mut owned: Vec<ShortLink> = links
            .values()
            .filter(|link| link.created_by.as_deref() == Some(owner))
            .filter(|link| include_expired || !link.is_expired())
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = ((page - 1) * page_size).max(0) as usize;
        Ok(owned
            .into_iter()
            .skip(offset)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
