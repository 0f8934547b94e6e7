//! DTOs for the owner slug listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::application::services::AllocatedLink;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

/// Query parameters for listing an owner's slugs.
#[derive(Debug, Deserialize)]
pub struct SlugListParams {
    #[serde(default)]
    pub page: Option<i64>,

    #[serde(default)]
    pub page_size: Option<i64>,

    #[serde(default)]
    pub include_expired: Option<bool>,
}

impl SlugListParams {
    /// Validates parameters and applies defaults.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 100
    ///
    /// # Returns
    ///
    /// `(page, page_size, include_expired)` for the store query.
    pub fn validate(&self) -> Result<(i64, i64, bool), String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err("page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("page_size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok((page, page_size, self.include_expired.unwrap_or(false)))
    }
}

/// Response wrapping the owner's records.
#[derive(Debug, Serialize)]
pub struct SlugListResponse {
    pub slugs: Vec<SlugListItem>,
}

/// A single record in the listing.
#[derive(Debug, Serialize)]
pub struct SlugListItem {
    pub slug: String,
    pub short_link: String,
    pub destination: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utms: Option<HashMap<String, String>>,

    pub redirect_count: i64,
    pub track_clicks: bool,
}

impl From<AllocatedLink> for SlugListItem {
    fn from(allocated: AllocatedLink) -> Self {
        Self {
            slug: allocated.link.slug,
            short_link: allocated.short_link,
            destination: allocated.link.destination,
            expiration: allocated.link.expire_at,
            utms: allocated.link.utms,
            redirect_count: allocated.link.redirect_count,
            track_clicks: allocated.link.track_clicks,
        }
    }
}
