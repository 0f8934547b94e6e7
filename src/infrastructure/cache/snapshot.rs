//! Cached resolution snapshot and its decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;

/// Denormalized copy of the fields needed to resolve a slug without a store
/// read. Never authoritative; expiry is re-evaluated on every read because
/// the cache TTL may outlive the record's own `expire_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugSnapshot {
    pub destination: String,
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub track_clicks: bool,
}

impl SlugSnapshot {
    pub fn from_link(link: &ShortLink) -> Self {
        Self {
            destination: link.destination.clone(),
            expire_at: link.expire_at,
            track_clicks: link.track_clicks,
        }
    }

    /// Serializes the snapshot to its cache representation.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("snapshot serialization cannot fail")
    }

    /// Returns true if the snapshot's expiry is strictly in the past.
    pub fn is_expired(&self) -> bool {
        self.expire_at.is_some_and(|e| e < Utc::now())
    }
}

/// Decoded form of a raw cached value.
///
/// Older deployments cached the bare destination string; anything that is not
/// a well-formed snapshot is honored as that legacy form rather than guessed
/// at through runtime type inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Snapshot(SlugSnapshot),
    Legacy(String),
}

impl CachedValue {
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<SlugSnapshot>(raw) {
            Ok(snapshot) => Self::Snapshot(snapshot),
            Err(_) => Self::Legacy(raw.to_string()),
        }
    }

    /// Converts into a resolvable snapshot.
    ///
    /// A legacy value carries no expiry and no tracking flag: the raw value
    /// itself is the destination.
    pub fn into_snapshot(self) -> SlugSnapshot {
        match self {
            Self::Snapshot(snapshot) => snapshot,
            Self::Legacy(destination) => SlugSnapshot {
                destination,
                expire_at: None,
                track_clicks: false,
            },
        }
    }
}
