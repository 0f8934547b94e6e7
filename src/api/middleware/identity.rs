//! Opaque caller identity extraction.
//!
//! Authentication itself lives upstream (an identity-producing service or
//! reverse proxy); this extractor only reads the owner identifier that
//! service forwards. The value is treated as an opaque string.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Header carrying the authenticated owner identifier.
pub const IDENTITY_HEADER: &str = "x-auth-user";

/// Optional caller identity.
///
/// `None` means anonymous: allocation accepts it, listing rejects it with
/// 401 at the handler.
#[derive(Debug, Clone)]
pub struct Identity(pub Option<String>);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from);

        Ok(Identity(owner))
    }
}
