//! Click event model for asynchronous click tracking.

/// A click on a tracked short link, queued for async processing.
///
/// Sent from the resolution service to the background worker via a bounded
/// channel, decoupling the redirect response from the counter write. The event
/// carries only the slug: the worker's single job is an atomic increment of
/// that slug's redirect counter.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub slug: String,
}

impl ClickEvent {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}
