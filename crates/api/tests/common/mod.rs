#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vidnotes_api::auth::google::{OAuthConfig, TokenVerifier, VerifiedIdentity, VerifyError};
use vidnotes_api::auth::password::hash_password;
use vidnotes_api::auth::session::SessionConfig;
use vidnotes_api::config::ServerConfig;
use vidnotes_api::router::build_app_router;
use vidnotes_api::state::AppState;
use vidnotes_db::models::user::{CreateUser, User};
use vidnotes_db::{MemoryStore, UserStore};

pub const TEST_PASSWORD: &str = "foo1234!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
            ttl_hours: 336,
            cookie_name: "session".to_string(),
            cookie_secure: true,
            cleanup_interval_secs: 3600,
        },
        oauth: OAuthConfig {
            tokeninfo_url: "http://127.0.0.1:9/tokeninfo".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Token verifier that answers from a fixed table instead of calling Google.
///
/// `"good-<email>"` verifies as `<email>`; `"unverified"` fails the email
/// check; anything else is rejected with HTTP 400.
pub struct StubVerifier;

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifyError> {
        if let Some(email) = token.strip_prefix("good-") {
            return Ok(VerifiedIdentity {
                email: email.to_string(),
                subject: Some("stub-subject".to_string()),
            });
        }
        if token == "unverified" {
            return Err(VerifyError::EmailNotVerified);
        }
        Err(VerifyError::Rejected(400))
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config),
        verifier: Arc::new(StubVerifier),
    };
    build_app_router(state)
}

/// Insert a password user straight into the store.
pub async fn create_password_user(store: &MemoryStore, email: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    store
        .create_user(&CreateUser {
            email: email.to_string(),
            password_hash,
        })
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), cookie).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), cookie).await
}

pub async fn delete_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(body), cookie).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` pair of the first `Set-Cookie` header, ready to send back.
pub fn session_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Log in with [`TEST_PASSWORD`] and return the session cookie pair.
pub async fn login(app: Router, email: &str) -> String {
    let response = post_json(
        app,
        "/v1/login",
        serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    session_cookie_pair(&response).expect("login must set a session cookie")
}
