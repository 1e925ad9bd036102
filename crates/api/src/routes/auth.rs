//! Route definitions for authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes.
///
/// ```text
/// POST /login                -> login
/// POST /oauth/google/login   -> google_login
/// POST /logout               -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/oauth/google/login", post(auth::google_login))
        .route("/logout", post(auth::logout))
}
