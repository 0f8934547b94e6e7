//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AllocationService, ResolutionService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkStore;
use crate::infrastructure::cache::SlugCache;

/// Application state shared across all request handlers.
///
/// All configuration (base URL, cache TTL) is injected at construction; there
/// is no ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService>,
    pub resolution_service: Arc<ResolutionService>,
    pub store: Arc<dyn LinkStore>,
    pub cache: Arc<dyn SlugCache>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires the services over the given store, cache, and click channel.
    pub fn new(
        store: Arc<dyn LinkStore>,
        cache: Arc<dyn SlugCache>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: String,
        cache_ttl_seconds: u64,
    ) -> Self {
        let allocation_service = Arc::new(AllocationService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            base_url,
            cache_ttl_seconds,
        ));

        let resolution_service = Arc::new(ResolutionService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            click_sender.clone(),
            cache_ttl_seconds,
        ));

        Self {
            allocation_service,
            resolution_service,
            store,
            cache,
            click_sender,
        }
    }
}
