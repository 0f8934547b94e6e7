//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::identity::Identity;
use crate::application::services::AllocationRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "slug": "promo-2026",              // optional
///   "expiration": "2026-12-01T00:00:00Z",  // optional, lenient
///   "utms": { "utm_source": "news" },  // optional
///   "track_clicks": true               // optional, default false
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_destination` / `invalid_slug_format`
/// - 409 `slug_conflict`
/// - 503 `slug_exhaustion` (transient; retry the request)
pub async fn shorten_handler(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let allocated = state
        .allocation_service
        .allocate(AllocationRequest {
            destination: payload.url,
            custom_slug: payload.slug,
            expiration: payload.expiration,
            utms: payload.utms,
            track_clicks: payload.track_clicks,
            owner,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(allocated.into())))
}
