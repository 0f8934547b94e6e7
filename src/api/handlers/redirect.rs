//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its destination URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Status Selection
///
/// - No expiry: permanent redirect (the mapping is immutable)
/// - Future expiry: temporary redirect (the link will die)
/// - Past expiry: `410 Gone` with the dead destination in the error details
/// - Unknown slug: `404 Not Found`
///
/// Tracked links get `Cache-Control: no-store` so intermediaries don't absorb
/// clicks the counter would miss.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.resolution_service.resolve(&slug).await? {
        Resolution::Active(snapshot) => {
            let redirect = if snapshot.expire_at.is_some() {
                Redirect::temporary(&snapshot.destination)
            } else {
                Redirect::permanent(&snapshot.destination)
            };

            if snapshot.track_clicks {
                Ok((
                    [
                        (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
                        (header::PRAGMA, "no-cache"),
                    ],
                    redirect,
                )
                    .into_response())
            } else {
                Ok(redirect.into_response())
            }
        }
        Resolution::Expired(snapshot) => Err(AppError::gone(
            "This link has expired",
            json!({
                "slug": slug,
                "destination": snapshot.destination,
                "expire_at": snapshot.expire_at,
            }),
        )),
    }
}
