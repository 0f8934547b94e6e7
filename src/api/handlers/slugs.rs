//! Handler for listing an owner's slugs.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::slug_list::{SlugListParams, SlugListResponse};
use crate::api::middleware::identity::{IDENTITY_HEADER, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's short links, newest first.
///
/// # Endpoint
///
/// `GET /api/slugs?page=1&page_size=100&include_expired=false`
///
/// # Errors
///
/// - 401 `unauthorized` when no identity header is present
/// - 400 `validation_error` on out-of-range pagination
pub async fn slug_list_handler(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Query(params): Query<SlugListParams>,
) -> Result<Json<SlugListResponse>, AppError> {
    let owner = owner.ok_or_else(|| {
        AppError::unauthorized(
            "Caller identity required",
            json!({ "header": IDENTITY_HEADER }),
        )
    })?;

    let (page, page_size, include_expired) = params
        .validate()
        .map_err(|reason| AppError::validation("Invalid pagination", json!({ "reason": reason })))?;

    let listed = state
        .allocation_service
        .list_for_owner(&owner, page, page_size, include_expired)
        .await?;

    Ok(Json(SlugListResponse {
        slugs: listed.into_iter().map(Into::into).collect(),
    }))
}
