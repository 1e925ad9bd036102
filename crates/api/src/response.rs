//! Response bodies shared by the API handlers.
//!
//! The wire format is flat JSON (no envelope) so existing clients that read
//! `email`/`annotations`/`user_videos` keep working.

use serde::Serialize;
use vidnotes_core::library::{Annotation, AnnotationMap, TitleMap};
use vidnotes_db::models::user::User;

/// Public view of a user: email plus the full annotation map.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub annotations: AnnotationMap,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            annotations: user.annotations.0.clone(),
        }
    }
}

/// `GET /v1/list` body.
#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub user_videos: TitleMap,
}

/// `GET /v1/annotations` body.
#[derive(Debug, Serialize)]
pub struct AnnotationsResponse {
    pub annotations: Vec<Annotation>,
}

/// Body for endpoints that only acknowledge.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
