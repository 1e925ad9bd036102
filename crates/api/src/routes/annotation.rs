//! Route definitions for the video library.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Library routes. All require a session.
///
/// ```text
/// GET    /list                -> list_videos
/// GET    /annotations         -> get_annotations
/// PUT    /add                 -> add_annotation
/// DELETE /delete/video        -> delete_video
/// DELETE /delete/annotation   -> delete_annotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(annotation::list_videos))
        .route("/annotations", get(annotation::get_annotations))
        .route("/add", put(annotation::add_annotation))
        .route("/delete/video", delete(annotation::delete_video))
        .route("/delete/annotation", delete(annotation::delete_annotation))
}
