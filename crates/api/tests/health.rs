//! `/health`, fallback routing, request ids and CORS.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
    ORIGIN,
};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, build_test_app_with_config, get, test_config};
use tower::ServiceExt;
use vidnotes_db::MemoryStore;

#[tokio::test]
async fn health_reports_store_status() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    let response = get(app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn unversioned_api_path_is_404() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    let response = get(app, "/list", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn error_responses_carry_request_id() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    let response = get(app, "/v1/list", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-request-id").is_some());
}

/// With `*` configured, any origin is echoed back together with credentials.
#[tokio::test]
async fn cors_mirrors_origin_with_credentials() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/login")
        .header(ORIGIN, "chrome-extension://abcdef")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "chrome-extension://abcdef"
    );
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

/// With an explicit list, other origins get no CORS grant.
#[tokio::test]
async fn cors_list_rejects_unlisted_origin() {
    let mut config = test_config();
    config.cors_origins = vec!["https://allowed.example".to_string()];
    let app = build_test_app_with_config(Arc::new(MemoryStore::new()), config);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
