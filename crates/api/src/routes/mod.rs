pub mod annotation;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /login                      password login (public)
/// /oauth/google/login         Google login (public)
/// /logout                     logout (session optional)
///
/// /list                       video titles
/// /annotations?video_id=      annotations for one video
/// /add                        append annotation
/// /delete/video               delete a video
/// /delete/annotation          delete annotations by timestamp
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(annotation::router())
}
