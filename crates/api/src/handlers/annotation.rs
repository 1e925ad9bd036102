//! Handlers for listing videos and reading, adding and deleting annotations.
//!
//! Every mutation goes through [`update_library`], so the annotation map and
//! the title map are always written together.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vidnotes_core::library::Annotation;
use vidnotes_core::validation::{
    validate_max_length, validate_video_id, MAX_CONTENT_LENGTH, MAX_TIMESTAMP_LENGTH,
    MAX_TITLE_LENGTH,
};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::library::update_library;
use crate::middleware::auth::CurrentUser;
use crate::response::{AnnotationsResponse, UserResponse, VideoListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /v1/annotations`.
#[derive(Debug, Deserialize)]
pub struct AnnotationsQuery {
    #[serde(default)]
    pub video_id: String,
}

/// Request body for `PUT /v1/add`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAnnotationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "video id empty"))]
    pub video_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ts empty"))]
    pub ts: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "content empty"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "video title empty"))]
    pub video_title: String,
}

/// Request body for `DELETE /v1/delete/video`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteVideoRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "video id empty"))]
    pub video_id: String,
}

/// Request body for `DELETE /v1/delete/annotation`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteAnnotationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "video id empty"))]
    pub video_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "annotation ts empty"))]
    pub annotation_ts: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/list
///
/// Map of annotated video ids to their titles.
pub async fn list_videos(current: CurrentUser) -> Json<VideoListResponse> {
    Json(VideoListResponse {
        user_videos: current.user.video_titles.0,
    })
}

/// GET /v1/annotations?video_id=
///
/// Annotations for one video; an unknown video yields an empty list.
pub async fn get_annotations(
    current: CurrentUser,
    Query(params): Query<AnnotationsQuery>,
) -> AppResult<Json<AnnotationsResponse>> {
    validate_video_id(&params.video_id)?;

    let annotations = current
        .user
        .annotations
        .0
        .get(&params.video_id)
        .cloned()
        .unwrap_or_default();

    Ok(Json(AnnotationsResponse { annotations }))
}

/// PUT /v1/add
///
/// Append an annotation and record the video title. Identical timestamps
/// are kept as separate entries.
pub async fn add_annotation(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<AddAnnotationRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_video_id(&input.video_id)?;
    validate_max_length("ts", &input.ts, MAX_TIMESTAMP_LENGTH)?;
    validate_max_length("content", &input.content, MAX_CONTENT_LENGTH)?;
    validate_max_length("video title", &input.video_title, MAX_TITLE_LENGTH)?;

    let (user, ()) = update_library(state.store.as_ref(), current.user, |library| {
        library.append(
            &input.video_id,
            Annotation::new(input.ts.as_str(), input.content.as_str()),
            &input.video_title,
        );
        Ok(())
    })
    .await?;

    tracing::info!(user_id = user.id, video_id = %input.video_id, "Annotation added");
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /v1/delete/video
///
/// Remove a video's annotations and title in one write. 404 if unknown.
pub async fn delete_video(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<DeleteVideoRequest>,
) -> AppResult<Json<UserResponse>> {
    let (user, ()) = update_library(state.store.as_ref(), current.user, |library| {
        library.remove_video(&input.video_id)
    })
    .await?;

    tracing::info!(user_id = user.id, video_id = %input.video_id, "Video deleted");
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /v1/delete/annotation
///
/// Remove every annotation on the video whose timestamp matches exactly.
/// 404 if the video has no annotation list.
pub async fn delete_annotation(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<DeleteAnnotationRequest>,
) -> AppResult<Json<UserResponse>> {
    let (user, removed) = update_library(state.store.as_ref(), current.user, |library| {
        library.remove_annotations_at(&input.video_id, &input.annotation_ts)
    })
    .await?;

    tracing::info!(
        user_id = user.id,
        video_id = %input.video_id,
        removed,
        "Annotations deleted"
    );
    Ok(Json(UserResponse::from(&user)))
}
