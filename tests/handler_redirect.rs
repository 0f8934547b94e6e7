mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};

use shortly::api::handlers::redirect_handler;
use shortly::state::AppState;

fn redirect_app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{slug}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_without_expiry_is_permanent() {
    let (state, store, _rx) = common::create_test_state();
    common::create_test_link(&store, "redirect1", "https://example.com/target").await;

    let server = redirect_app(state);
    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 308);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_with_future_expiry_is_temporary() {
    let (state, store, _rx) = common::create_test_state();
    common::create_expiring_link(
        &store,
        "tempslug1",
        "https://example.com/soon-gone",
        Utc::now() + Duration::hours(1),
    )
    .await;

    let server = redirect_app(state);
    let response = server.get("/tempslug1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/soon-gone");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store, _rx) = common::create_test_state();

    let server = redirect_app(state);
    let response = server.get("/notfound1").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired_is_gone_with_metadata() {
    let (state, store, _rx) = common::create_test_state();
    common::create_expiring_link(
        &store,
        "deadslug1",
        "https://example.com/dead",
        Utc::now() - Duration::hours(1),
    )
    .await;

    let server = redirect_app(state);
    let response = server.get("/deadslug1").await;

    assert_eq!(response.status_code(), 410);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "gone");
    assert_eq!(
        body["error"]["details"]["destination"],
        "https://example.com/dead"
    );
}

#[tokio::test]
async fn test_redirect_dispatches_click_for_tracked_link() {
    let (state, store, mut rx) = common::create_test_state();
    common::create_tracked_link(&store, "clickme12", "https://example.com").await;

    let server = redirect_app(state);
    let response = server.get("/clickme12").await;

    assert_eq!(response.status_code(), 308);

    let click_event = rx.try_recv();
    assert!(click_event.is_ok());
    assert_eq!(click_event.unwrap().slug, "clickme12");
}

#[tokio::test]
async fn test_redirect_no_click_for_untracked_link() {
    let (state, store, mut rx) = common::create_test_state();
    common::create_test_link(&store, "quietslug", "https://example.com").await;

    let server = redirect_app(state);
    server.get("/quietslug").await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_tracked_redirect_disables_caching() {
    let (state, store, _rx) = common::create_test_state();
    common::create_tracked_link(&store, "clickme12", "https://example.com").await;

    let server = redirect_app(state);
    let response = server.get("/clickme12").await;

    let cache_control = response.header("cache-control");
    assert!(
        cache_control.to_str().unwrap().contains("no-store"),
        "expected no-store, got {cache_control:?}"
    );
}

#[tokio::test]
async fn test_untracked_redirect_has_no_cache_header() {
    let (state, store, _rx) = common::create_test_state();
    common::create_test_link(&store, "quietslug", "https://example.com").await;

    let server = redirect_app(state);
    let response = server.get("/quietslug").await;

    assert!(response.maybe_header("cache-control").is_none());
}
