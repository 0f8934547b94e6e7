//! Background worker applying click increments.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkStore;

/// Retries per increment before the event is dropped.
const MAX_RETRIES: usize = 3;

/// Drains the click channel and applies atomic redirect-count increments.
///
/// Each increment is retried with jittered exponential backoff. A failure
/// after all retries is logged and counted; it never propagates anywhere, and
/// an event already pulled from the channel is processed to completion
/// regardless of what happened to the originating request. The worker exits
/// when every sender has been dropped.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, store: Arc<dyn LinkStore>) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(MAX_RETRIES);

        match Retry::spawn(strategy, || store.increment_redirect_count(&event.slug)).await {
            Ok(()) => {
                counter!("shortly_clicks_recorded_total").increment(1);
            }
            Err(e) => {
                counter!("shortly_clicks_failed_total").increment(1);
                warn!(slug = %event.slug, error = %e, "failed to record click");
            }
        }
    }
}
