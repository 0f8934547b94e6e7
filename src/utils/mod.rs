//! Utility functions for slug handling and URL composition.
//!
//! - [`slug`] - Slug validation and random generation
//! - [`utm`] - UTM parameter merging into destination URLs
//! - [`expiration`] - Lenient expiration timestamp parsing

pub mod expiration;
pub mod slug;
pub mod utm;
