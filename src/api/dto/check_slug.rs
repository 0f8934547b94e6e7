//! DTOs for the slug availability endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::SlugAvailability;

/// Request to check whether a slug can be allocated.
#[derive(Debug, Deserialize)]
pub struct CheckSlugRequest {
    pub slug: String,
}

/// Availability verdict; unavailability is a reason, not an error.
#[derive(Debug, Serialize)]
pub struct CheckSlugResponse {
    pub available: bool,
    pub message: String,
}

impl From<SlugAvailability> for CheckSlugResponse {
    fn from(availability: SlugAvailability) -> Self {
        Self {
            available: availability.available,
            message: availability.message,
        }
    }
}
