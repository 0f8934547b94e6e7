#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

use shortly::domain::click_event::ClickEvent;
use shortly::domain::entities::{NewShortLink, ShortLink};
use shortly::domain::repositories::LinkStore;
use shortly::infrastructure::cache::{NullCache, SlugCache};
use shortly::infrastructure::persistence::MemoryLinkStore;
use shortly::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// Builds an application state over the in-memory store and a disabled cache,
/// returning the store and the click channel receiver for assertions.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkStore>,
    mpsc::Receiver<ClickEvent>,
) {
    let store = Arc::new(MemoryLinkStore::new());
    let cache: Arc<dyn SlugCache> = Arc::new(NullCache::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        store.clone() as Arc<dyn LinkStore>,
        cache,
        tx,
        BASE_URL.to_string(),
        86_400,
    );

    (state, store, rx)
}

pub async fn create_test_link(store: &MemoryLinkStore, slug: &str, destination: &str) -> ShortLink {
    seed(store, slug, destination, None, None, false).await
}

pub async fn create_owned_link(
    store: &MemoryLinkStore,
    slug: &str,
    destination: &str,
    owner: &str,
) -> ShortLink {
    seed(store, slug, destination, Some(owner), None, false).await
}

pub async fn create_tracked_link(
    store: &MemoryLinkStore,
    slug: &str,
    destination: &str,
) -> ShortLink {
    seed(store, slug, destination, None, None, true).await
}

pub async fn create_expiring_link(
    store: &MemoryLinkStore,
    slug: &str,
    destination: &str,
    expire_at: DateTime<Utc>,
) -> ShortLink {
    seed(store, slug, destination, None, Some(expire_at), false).await
}

async fn seed(
    store: &MemoryLinkStore,
    slug: &str,
    destination: &str,
    owner: Option<&str>,
    expire_at: Option<DateTime<Utc>>,
    track_clicks: bool,
) -> ShortLink {
    store
        .insert(NewShortLink {
            slug: slug.to_string(),
            destination: destination.to_string(),
            created_by: owner.map(String::from),
            expire_at,
            track_clicks,
            utms: None,
        })
        .await
        .unwrap()
}
