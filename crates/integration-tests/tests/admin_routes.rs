//! Admin router tests: requests go through the real handlers, extractors
//! and templates, with the stand-in orders API behind them.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use creperie_admin::config::AdminConfig;
use creperie_admin::routes::routes;
use creperie_admin::state::AppState;
use creperie_core::OrderStatus;
use creperie_integration_tests::MockOrdersApi;

fn test_state(api: &MockOrdersApi, dir: &tempfile::TempDir) -> AppState {
    let config = AdminConfig {
        api_base_url: api.base_url().clone(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        session_file: dir.path().join("session.json"),
        sentry_dsn: None,
        sentry_environment: None,
    };
    AppState::new(config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_status(reference: &str, status: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/orders/{reference}/status"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("status={status}")))
        .unwrap()
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let api = MockOrdersApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let router = routes().with_state(test_state(&api, &dir));

    let response = router.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_status_update_redirects_with_flash_flag() {
    let api = MockOrdersApi::start().await;
    let reference = api.seed_order(OrderStatus::Processing);
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&api, &dir);
    let router = routes().with_state(state.clone());

    state.gate().begin().unwrap();

    let response = router
        .oneshot(post_status(reference.as_str(), "preparing"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, format!("/orders/{}?updated=1", reference.as_str()));
    assert_eq!(api.status_of(&reference), Some(OrderStatus::Preparing));
}

#[tokio::test]
async fn test_status_update_response_after_logout_is_discarded() {
    let api = MockOrdersApi::start().await;
    api.set_patch_delay(Duration::from_millis(500));
    let reference = api.seed_order(OrderStatus::Processing);
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&api, &dir);
    let router = routes().with_state(state.clone());

    state.gate().begin().unwrap();

    let pending = tokio::spawn(router.oneshot(post_status(reference.as_str(), "preparing")));

    // Drop the session while the store's answer is still in flight.
    tokio::time::sleep(Duration::from_millis(150)).await;
    state.gate().logout().unwrap();

    let response = pending.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    // The store confirmed the update; only the response was discarded.
    assert_eq!(api.patch_calls(), 1);
    assert_eq!(api.status_of(&reference), Some(OrderStatus::Preparing));
}

#[tokio::test]
async fn test_lone_date_bound_not_forwarded() {
    let api = MockOrdersApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&api, &dir);
    let router = routes().with_state(state.clone());

    state.gate().begin().unwrap();

    let response = router
        .oneshot(get("/?start_date=2026-08-01"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let query = api.last_list_query().expect("listing call");
    assert!(!query.contains_key("startDate"));
    assert!(!query.contains_key("endDate"));
}

#[tokio::test]
async fn test_date_pair_forwarded_to_api() {
    let api = MockOrdersApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&api, &dir);
    let router = routes().with_state(state.clone());

    state.gate().begin().unwrap();

    let response = router
        .oneshot(get("/?start_date=2026-08-01&end_date=2026-08-31"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let query = api.last_list_query().expect("listing call");
    assert_eq!(query.get("startDate").map(String::as_str), Some("2026-08-01"));
    assert_eq!(query.get("endDate").map(String::as_str), Some("2026-08-31"));
    assert_eq!(query.get("limit").map(String::as_str), Some("5"));
}
