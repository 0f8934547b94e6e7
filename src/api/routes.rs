//! API route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{check_slug_handler, shorten_handler, slug_list_handler};
use crate::state::AppState;

/// API routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`    - Create a short link
/// - `POST /check-slug` - Check slug availability
/// - `GET  /slugs`      - List the caller's links (requires identity header)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/check-slug", post(check_slug_handler))
        .route("/slugs", get(slug_list_handler))
}
