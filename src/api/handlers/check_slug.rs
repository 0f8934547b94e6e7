//! Handler for the slug availability endpoint.

use axum::{Json, extract::State};

use crate::api::dto::check_slug::{CheckSlugRequest, CheckSlugResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Checks whether a slug is available for allocation.
///
/// # Endpoint
///
/// `POST /api/check-slug`
///
/// Always answers 200: an invalid format or an existing record are reported
/// as `available: false` with a reason, not as request errors.
pub async fn check_slug_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckSlugRequest>,
) -> Result<Json<CheckSlugResponse>, AppError> {
    let availability = state
        .allocation_service
        .check_availability(&payload.slug)
        .await?;

    Ok(Json(availability.into()))
}
