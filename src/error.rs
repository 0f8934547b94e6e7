//! Application error taxonomy and HTTP response mapping.
//!
//! Allocation-path errors: [`AppError::InvalidDestination`],
//! [`AppError::InvalidSlugFormat`], [`AppError::SlugConflict`],
//! [`AppError::SlugExhaustion`]. Resolution-path errors:
//! [`AppError::NotFound`], [`AppError::Gone`]. Infrastructure errors from the
//! persistent store surface as [`AppError::Store`]; cache failures never reach
//! this type (they degrade to store reads and are logged at the call site).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// Request shape is invalid (boundary plumbing, e.g. pagination bounds).
    Validation { message: String, details: Value },
    /// Destination URL failed basic syntax validation.
    InvalidDestination { message: String, details: Value },
    /// Custom slug does not match the allowed format.
    InvalidSlugFormat { message: String, details: Value },
    /// Slug is already allocated (pre-check hit or uniqueness violation at insert).
    SlugConflict { message: String, details: Value },
    /// Auto-generation ran out of attempts; transient, the caller may retry.
    SlugExhaustion { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// Record exists but its expiry has passed.
    Gone { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    /// Persistent store failure; nothing to serve.
    Store { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_destination(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidDestination {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_slug_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidSlugFormat {
            message: message.into(),
            details,
        }
    }

    pub fn slug_conflict(message: impl Into<String>, details: Value) -> Self {
        Self::SlugConflict {
            message: message.into(),
            details,
        }
    }

    pub fn slug_exhaustion(attempts: usize) -> Self {
        Self::SlugExhaustion {
            message: "Failed to generate a unique slug".to_string(),
            details: json!({ "attempts": attempts }),
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::InvalidDestination { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_destination",
                message,
                details,
            ),
            AppError::InvalidSlugFormat { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_slug_format",
                message,
                details,
            ),
            AppError::SlugConflict { message, details } => {
                (StatusCode::CONFLICT, "slug_conflict", message, details)
            }
            AppError::SlugExhaustion { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "slug_exhaustion",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Gone { message, details } => (StatusCode::GONE, "gone", message, details),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Store { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                message,
                details,
            ),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::InvalidDestination { message, .. }
            | AppError::InvalidSlugFormat { message, .. }
            | AppError::SlugConflict { message, .. }
            | AppError::SlugExhaustion { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Gone { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Store { message, .. } => message,
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::slug_conflict(
                    "Slug already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        AppError::store("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::validation("Invalid request", json!({ "errors": errors.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::invalid_destination("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::invalid_slug_format("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::slug_conflict("taken", json!({})),
                StatusCode::CONFLICT,
            ),
            (
                AppError::slug_exhaustion(5),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::not_found("missing", json!({})),
                StatusCode::NOT_FOUND,
            ),
            (AppError::gone("expired", json!({})), StatusCode::GONE),
            (
                AppError::unauthorized("who", json!({})),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::store("down", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, _, _, _) = error.parts();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_display_uses_message() {
        let error = AppError::slug_conflict("Slug already exists", json!({"slug": "promo-2026"}));
        assert_eq!(error.to_string(), "Slug already exists");
    }

    #[test]
    fn test_slug_exhaustion_details_carry_attempts() {
        let error = AppError::slug_exhaustion(5);
        let AppError::SlugExhaustion { details, .. } = &error else {
            panic!("expected SlugExhaustion");
        };
        assert_eq!(details["attempts"], 5);
    }
}
