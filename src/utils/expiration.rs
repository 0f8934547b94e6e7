//! Lenient expiration timestamp parsing.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an expiration input into a UTC timestamp.
///
/// Accepts RFC 3339 (`2026-01-01T00:00:00Z`, offsets allowed) and the naive
/// form `2026-01-01T00:00:00`, which is taken as UTC. Anything else yields
/// `None`: an unparseable expiration is treated as absent, never rejected.
pub fn parse_expiration(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    None
}
