//! Slug allocation service.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::infrastructure::cache::{SlugCache, SlugSnapshot};
use crate::utils::expiration::parse_expiration;
use crate::utils::slug::{generate_slug, is_valid_slug};
use crate::utils::utm::merge_utms;

/// Generation attempts before giving up with [`AppError::SlugExhaustion`].
const MAX_GENERATE_ATTEMPTS: usize = 5;

/// Input for creating a new short link.
#[derive(Debug, Clone)]
pub struct AllocationRequest {
    pub destination: String,
    pub custom_slug: Option<String>,
    /// Raw expiration input; unparseable values are treated as absent.
    pub expiration: Option<String>,
    pub utms: Option<HashMap<String, String>>,
    pub track_clicks: bool,
    pub owner: Option<String>,
}

/// A freshly allocated record together with its caller-facing short link.
#[derive(Debug, Clone)]
pub struct AllocatedLink {
    pub link: ShortLink,
    pub short_link: String,
}

/// Availability verdict for a candidate slug.
#[derive(Debug, Clone)]
pub struct SlugAvailability {
    pub available: bool,
    pub message: String,
}

/// Service for creating short links and checking slug availability.
///
/// The store's uniqueness constraint is the final arbiter for concurrent
/// allocations; pre-checks here only avoid the round trip in the common case.
pub struct AllocationService {
    store: Arc<dyn LinkStore>,
    cache: Arc<dyn SlugCache>,
    base_url: String,
    cache_ttl_seconds: u64,
}

impl AllocationService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        cache: Arc<dyn SlugCache>,
        base_url: String,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            cache,
            base_url,
            cache_ttl_seconds,
        }
    }

    /// Creates a new short link and makes it immediately resolvable.
    ///
    /// The destination is persisted with any UTM parameters already merged in
    /// and is immutable from then on. The cache is primed with the resolution
    /// snapshot, best-effort.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidDestination`] - destination fails URL-syntax validation
    /// - [`AppError::InvalidSlugFormat`] - custom slug has a bad format
    /// - [`AppError::SlugConflict`] - custom slug taken (pre-check or insert race)
    /// - [`AppError::SlugExhaustion`] - auto-generation ran out of attempts;
    ///   transient, the caller may retry the whole allocation
    pub async fn allocate(&self, request: AllocationRequest) -> Result<AllocatedLink, AppError> {
        validate_destination(&request.destination)?;

        let destination = merge_utms(&request.destination, request.utms.as_ref());

        let slug = match request.custom_slug {
            Some(custom) => {
                if !is_valid_slug(&custom) {
                    return Err(AppError::invalid_slug_format(
                        "Slug must be 8-32 characters of letters, digits, hyphen or underscore",
                        json!({ "slug": custom }),
                    ));
                }

                if self.store.find_by_slug(&custom).await?.is_some() {
                    return Err(AppError::slug_conflict(
                        "Slug already exists",
                        json!({ "slug": custom }),
                    ));
                }

                custom
            }
            None => self.generate_unique_slug().await?,
        };

        let expire_at = request
            .expiration
            .as_deref()
            .and_then(parse_expiration);

        let link = self
            .store
            .insert(NewShortLink {
                slug,
                destination,
                created_by: request.owner,
                expire_at,
                track_clicks: request.track_clicks,
                utms: request.utms,
            })
            .await?;

        let snapshot = SlugSnapshot::from_link(&link);
        if let Err(e) = self
            .cache
            .set_with_ttl(&link.slug, &snapshot.encode(), Some(self.cache_ttl_seconds))
            .await
        {
            warn!(slug = %link.slug, error = %e, "failed to prime cache after allocation");
        }

        let short_link = self.short_link_for(&link.slug);
        Ok(AllocatedLink { link, short_link })
    }

    /// Checks whether a slug could be allocated right now.
    ///
    /// Invalid format and an existing record both report unavailable with a
    /// reason; neither is an error.
    pub async fn check_availability(&self, slug: &str) -> Result<SlugAvailability, AppError> {
        if !is_valid_slug(slug) {
            return Ok(SlugAvailability {
                available: false,
                message: "Invalid format".to_string(),
            });
        }

        if self.store.find_by_slug(slug).await?.is_some() {
            return Ok(SlugAvailability {
                available: false,
                message: "Slug already exists".to_string(),
            });
        }

        Ok(SlugAvailability {
            available: true,
            message: String::new(),
        })
    }

    /// Lists an owner's records, newest first, with short links attached.
    pub async fn list_for_owner(
        &self,
        owner: &str,
        page: i64,
        page_size: i64,
        include_expired: bool,
    ) -> Result<Vec<AllocatedLink>, AppError> {
        let links = self
            .store
            .list_by_owner(owner, page, page_size, include_expired)
            .await?;

        Ok(links
            .into_iter()
            .map(|link| {
                let short_link = self.short_link_for(&link.slug);
                AllocatedLink { link, short_link }
            })
            .collect())
    }

    fn short_link_for(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }

    /// Generates a candidate slug with collision retry.
    ///
    /// Each attempt is checked against the store; the first miss wins.
    async fn generate_unique_slug(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let candidate = generate_slug();

            if self.store.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::slug_exhaustion(MAX_GENERATE_ATTEMPTS))
    }
}

/// Basic destination syntax check: an http(s) scheme with a non-empty
/// remainder. Deliberately loose; the UTM merge handles the strict parse and
/// falls back to naive appending when that fails.
fn validate_destination(destination: &str) -> Result<(), AppError> {
    let rest = destination
        .strip_prefix("https://")
        .or_else(|| destination.strip_prefix("http://"));

    match rest {
        Some(remainder) if !remainder.is_empty() => Ok(()),
        _ => Err(AppError::invalid_destination(
            "Destination must be an absolute http(s) URL",
            json!({ "url": destination }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkStore;
    use crate::infrastructure::cache::{CacheError, MockSlugCache};
    use chrono::{Datelike, Utc};

    fn stored_link(slug: &str, destination: &str) -> ShortLink {
        ShortLink {
            slug: slug.to_string(),
            destination: destination.to_string(),
            created_at: Utc::now(),
            created_by: None,
            expire_at: None,
            track_clicks: false,
            redirect_count: 0,
            utms: None,
        }
    }

    fn passthrough_cache() -> MockSlugCache {
        let mut cache = MockSlugCache::new();
        cache.expect_set_with_ttl().returning(|_, _, _| Ok(()));
        cache
    }

    fn service(store: MockLinkStore, cache: MockSlugCache) -> AllocationService {
        AllocationService::new(
            Arc::new(store),
            Arc::new(cache),
            "http://sho.rt".to_string(),
            86_400,
        )
    }

    fn request(destination: &str) -> AllocationRequest {
        AllocationRequest {
            destination: destination.to_string(),
            custom_slug: None,
            expiration: None,
            utms: None,
            track_clicks: false,
            owner: None,
        }
    }

    #[tokio::test]
    async fn test_allocate_auto_slug_success() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let result = service(store, passthrough_cache())
            .allocate(request("https://example.com"))
            .await
            .unwrap();

        assert!(is_valid_slug(&result.link.slug));
        assert_eq!(
            result.short_link,
            format!("http://sho.rt/{}", result.link.slug)
        );
        assert_eq!(result.link.destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_allocate_custom_slug() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_slug()
            .withf(|slug| slug == "my-slug-2026")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|new_link| new_link.slug == "my-slug-2026")
            .times(1)
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let mut req = request("https://example.com");
        req.custom_slug = Some("my-slug-2026".to_string());

        let result = service(store, passthrough_cache())
            .allocate(req)
            .await
            .unwrap();
        assert_eq!(result.link.slug, "my-slug-2026");
    }

    #[tokio::test]
    async fn test_allocate_custom_slug_bad_format() {
        let store = MockLinkStore::new();

        let mut req = request("https://example.com");
        req.custom_slug = Some("!!bad!!".to_string());

        let err = service(store, passthrough_cache())
            .allocate(req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSlugFormat { .. }));
    }

    #[tokio::test]
    async fn test_allocate_custom_slug_conflict() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_slug()
            .times(1)
            .returning(|slug| Ok(Some(stored_link(slug, "https://other.com"))));
        store.expect_insert().times(0);

        let mut req = request("https://example.com");
        req.custom_slug = Some("taken-123".to_string());

        let err = service(store, passthrough_cache())
            .allocate(req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlugConflict { .. }));
    }

    #[tokio::test]
    async fn test_allocate_insert_race_maps_to_conflict() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().returning(|_| Ok(None));
        store.expect_insert().times(1).returning(|_| {
            Err(AppError::slug_conflict(
                "Slug already exists",
                json!({ "constraint": "short_links_pkey" }),
            ))
        });

        let mut req = request("https://example.com");
        req.custom_slug = Some("raced-slug".to_string());

        let err = service(store, passthrough_cache())
            .allocate(req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlugConflict { .. }));
    }

    #[tokio::test]
    async fn test_allocate_invalid_destination() {
        let store = MockLinkStore::new();

        let err = service(store, passthrough_cache())
            .allocate(request("not-a-url"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDestination { .. }));

        let store = MockLinkStore::new();
        let err = service(store, passthrough_cache())
            .allocate(request("ftp://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDestination { .. }));
    }

    #[tokio::test]
    async fn test_allocate_exhausts_after_five_attempts() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_slug()
            .times(5)
            .returning(|slug| Ok(Some(stored_link(slug, "https://collision.com"))));
        store.expect_insert().times(0);

        let err = service(store, passthrough_cache())
            .allocate(request("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlugExhaustion { .. }));
    }

    #[tokio::test]
    async fn test_allocate_merges_utms_into_destination() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|new_link| {
                new_link.destination.contains("utm_source=x")
                    && new_link.utms.as_ref().is_some_and(|m| m.len() == 1)
            })
            .times(1)
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let mut req = request("http://a.com");
        req.utms = Some(HashMap::from([("utm_source".to_string(), "x".to_string())]));

        let result = service(store, passthrough_cache())
            .allocate(req)
            .await
            .unwrap();
        assert!(result.link.destination.contains("utm_source=x"));
    }

    #[tokio::test]
    async fn test_allocate_parses_expiration() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|new_link| {
                new_link
                    .expire_at
                    .is_some_and(|e| e.year() == 2026 && e.month() == 12)
            })
            .times(1)
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let mut req = request("https://example.com");
        req.expiration = Some("2026-12-01T00:00:00Z".to_string());

        service(store, passthrough_cache()).allocate(req).await.unwrap();
    }

    #[tokio::test]
    async fn test_allocate_ignores_unparseable_expiration() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|new_link| new_link.expire_at.is_none())
            .times(1)
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let mut req = request("https://example.com");
        req.expiration = Some("whenever".to_string());

        service(store, passthrough_cache()).allocate(req).await.unwrap();
    }

    #[tokio::test]
    async fn test_allocate_survives_cache_failure() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_slug().returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|new_link| Ok(stored_link(&new_link.slug, &new_link.destination)));

        let mut cache = MockSlugCache::new();
        cache
            .expect_set_with_ttl()
            .times(1)
            .returning(|_, _, _| Err(CacheError::OperationError("redis is down".to_string())));

        let result = service(store, cache)
            .allocate(request("https://example.com"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_check_availability() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_slug()
            .withf(|slug| slug == "free-slug")
            .returning(|_| Ok(None));
        store
            .expect_find_by_slug()
            .withf(|slug| slug == "used-slug")
            .returning(|slug| Ok(Some(stored_link(slug, "https://example.com"))));

        let service = service(store, MockSlugCache::new());

        let free = service.check_availability("free-slug").await.unwrap();
        assert!(free.available);

        let used = service.check_availability("used-slug").await.unwrap();
        assert!(!used.available);
        assert_eq!(used.message, "Slug already exists");

        let invalid = service.check_availability("bad").await.unwrap();
        assert!(!invalid.available);
        assert_eq!(invalid.message, "Invalid format");
    }

    #[tokio::test]
    async fn test_list_for_owner_attaches_short_links() {
        let mut store = MockLinkStore::new();
        store
            .expect_list_by_owner()
            .withf(|owner, page, page_size, include_expired| {
                owner == "alice" && *page == 1 && *page_size == 100 && !include_expired
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![stored_link("alice-link-1", "https://example.com")])
            });

        let listed = service(store, MockSlugCache::new())
            .list_for_owner("alice", 1, 100, false)
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].short_link, "http://sho.rt/alice-link-1");
    }
}
