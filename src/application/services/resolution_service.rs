//! Slug resolution service.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::infrastructure::cache::{CachedValue, SlugCache, SlugSnapshot};

/// Outcome of a successful lookup.
///
/// An expired record still carries its snapshot so the boundary can log the
/// dead destination while answering "gone", distinct from "not found".
#[derive(Debug, Clone)]
pub enum Resolution {
    Active(SlugSnapshot),
    Expired(SlugSnapshot),
}

/// Service resolving slugs to live destinations.
///
/// Cache-aside: the cache is only populated as a side effect of a store read
/// on miss. Expiry is evaluated on every read regardless of which path served
/// the snapshot, because the cache TTL is independent of the record's own
/// `expire_at` and may outlive it.
pub struct ResolutionService {
    store: Arc<dyn LinkStore>,
    cache: Arc<dyn SlugCache>,
    click_sender: mpsc::Sender<ClickEvent>,
    cache_ttl_seconds: u64,
}

impl ResolutionService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        cache: Arc<dyn SlugCache>,
        click_sender: mpsc::Sender<ClickEvent>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            cache,
            click_sender,
            cache_ttl_seconds,
        }
    }

    /// Resolves a slug to its destination snapshot.
    ///
    /// Cache errors degrade to a store read; a store miss is [`AppError::NotFound`]
    /// and writes nothing back to the cache. When the record tracks clicks, a
    /// click event is dispatched before the expiry check (expired links are
    /// still counted), and its fate never influences the returned result.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - no record for this slug
    /// - [`AppError::Store`] - store failure while the cache had nothing to serve
    pub async fn resolve(&self, slug: &str) -> Result<Resolution, AppError> {
        let cached = match self.cache.get(slug).await {
            Ok(Some(raw)) => {
                counter!("shortly_cache_hits_total").increment(1);
                Some(CachedValue::decode(&raw).into_snapshot())
            }
            Ok(None) => {
                counter!("shortly_cache_misses_total").increment(1);
                None
            }
            Err(e) => {
                warn!(%slug, error = %e, "cache read failed, falling back to store");
                None
            }
        };

        let snapshot = match cached {
            Some(snapshot) => snapshot,
            None => {
                let link = self.store.find_by_slug(slug).await?.ok_or_else(|| {
                    AppError::not_found("Slug not found", json!({ "slug": slug }))
                })?;

                let snapshot = SlugSnapshot::from_link(&link);

                // Repopulate the cache off the request path (fire-and-forget).
                let cache = Arc::clone(&self.cache);
                let key = link.slug.clone();
                let encoded = snapshot.encode();
                let ttl = self.cache_ttl_seconds;
                tokio::spawn(async move {
                    if let Err(e) = cache.set_with_ttl(&key, &encoded, Some(ttl)).await {
                        warn!(slug = %key, error = %e, "failed to repopulate cache");
                    }
                });

                snapshot
            }
        };

        if snapshot.track_clicks {
            self.dispatch_click(slug);
        }

        if snapshot.is_expired() {
            return Ok(Resolution::Expired(snapshot));
        }

        Ok(Resolution::Active(snapshot))
    }

    /// Queues a click for the background worker.
    ///
    /// Best-effort: a full queue drops the event rather than block the
    /// redirect. Once the worker picks an event up, a caller disconnect
    /// cannot cancel the increment.
    fn dispatch_click(&self, slug: &str) {
        if self.click_sender.try_send(ClickEvent::new(slug)).is_err() {
            counter!("shortly_clicks_dropped_total").increment(1);
            warn!(%slug, "click queue full, dropping click event");
        }
    }
}
