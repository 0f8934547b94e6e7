//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::application::services::AllocatedLink;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL; must be an absolute http(s) URL.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom slug (format-checked by the allocation service).
    pub slug: Option<String>,

    /// Optional expiration; unparseable values are silently treated as absent.
    pub expiration: Option<String>,

    /// UTM parameters merged into the destination at creation time.
    pub utms: Option<HashMap<String, String>>,

    /// Enable click tracking for this link.
    #[serde(default)]
    pub track_clicks: bool,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub short_link: String,
    pub destination: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,

    pub track_clicks: bool,
}

impl From<AllocatedLink> for ShortenResponse {
    fn from(allocated: AllocatedLink) -> Self {
        Self {
            slug: allocated.link.slug,
            short_link: allocated.short_link,
            destination: allocated.link.destination,
            expiration: allocated.link.expire_at,
            track_clicks: allocated.link.track_clicks,
        }
    }
}
