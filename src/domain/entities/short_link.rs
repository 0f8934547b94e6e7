//! Short link entity representing a slug → destination mapping.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A persisted short link record.
///
/// `destination` already carries any UTM parameters merged at creation time;
/// the `utms` map is a display-only copy. Records are never deleted, and every
/// field except `redirect_count` is immutable after creation.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub slug: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    /// Opaque owner identity; absent for anonymous creations.
    pub created_by: Option<String>,
    /// Absence means the link never expires.
    pub expire_at: Option<DateTime<Utc>>,
    pub track_clicks: bool,
    pub redirect_count: i64,
    pub utms: Option<HashMap<String, String>>,
}

impl ShortLink {
    /// Returns true if the link's expiry is strictly in the past.
    pub fn is_expired(&self) -> bool {
        self.expire_at.is_some_and(|e| e < Utc::now())
    }
}

/// Input data for creating a new short link.
///
/// `redirect_count` always starts at zero and is not part of the input.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub slug: String,
    pub destination: String,
    pub created_by: Option<String>,
    pub expire_at: Option<DateTime<Utc>>,
    pub track_clicks: bool,
    pub utms: Option<HashMap<String, String>>,
}
