//! Slug validation and generation.
//!
//! Validation is a pure predicate shared by the allocation path (custom slugs)
//! and the availability-check endpoint. Generation produces random candidates
//! only; uniqueness is the allocation service's responsibility.

use base64::Engine as _;
use regex::Regex;
use std::sync::LazyLock;

/// Allowed slug shape: URL-safe characters, bounded length.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{8,32}$").unwrap());

/// Length of random bytes before base64 encoding; 9 bytes encode to 12 chars.
const SLUG_LENGTH_BYTES: usize = 9;

/// Returns true iff `candidate` matches `^[A-Za-z0-9_-]{8,32}$`.
///
/// Pure, no side effects, no I/O.
pub fn is_valid_slug(candidate: &str) -> bool {
    SLUG_REGEX.is_match(candidate)
}

/// Generates a cryptographically secure random slug candidate.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character slug within the valid range.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_slug() -> String {
    let mut buffer = [0u8; SLUG_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
