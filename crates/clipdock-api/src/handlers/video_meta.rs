//! Video metadata handlers: create, fetch, list, delete.
//!
//! Read paths substitute the stored object key with a fresh short-lived
//! presigned URL so clients never see raw storage keys.

use crate::auth::CurrentUser;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clipdock_core::models::{CreateVideoRequest, Video, VideoResponse};
use clipdock_core::AppError;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Exchange the stored object key for a presigned playback URL. Records
/// without a published video pass through unchanged.
pub(crate) async fn into_playback_response(
    state: &AppState,
    video: Video,
) -> Result<VideoResponse, HttpAppError> {
    let mut response = VideoResponse::from(video);

    if let Some(key) = response.video_url.take() {
        let ttl = Duration::from_secs(state.config.presign_ttl_secs);
        let url = state.storage.presigned_get_url(&key, ttl).await?;
        response.video_url = Some(url);
    }

    Ok(response)
}

/// `POST /api/video_meta`
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), HttpAppError> {
    if request.title.trim().is_empty() || request.description.trim().is_empty() {
        return Err(AppError::BadRequest("Missing title or description".to_string()).into());
    }

    let video = state
        .videos
        .create(user_id, request.title, request.description)
        .await?;

    tracing::info!(video_id = %video.id, user_id = %user_id, "Video record created");

    Ok((StatusCode::CREATED, Json(VideoResponse::from(video))))
}

/// `GET /api/video_meta/{video_id}` - no authorization on the read path.
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    Ok(Json(into_playback_response(&state, video).await?))
}

/// `GET /api/video_meta` - all records owned by the caller.
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<VideoResponse>>, HttpAppError> {
    let videos = state.videos.list_by_user(user_id).await?;

    let mut responses = Vec::with_capacity(videos.len());
    for video in videos {
        responses.push(into_playback_response(&state, video).await?);
    }

    Ok(Json(responses))
}

/// `DELETE /api/video_meta/{video_id}`
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if video.user_id != user_id {
        return Err(AppError::Forbidden("Not authorized to delete this video".to_string()).into());
    }

    state.videos.delete(video_id).await?;

    tracing::info!(video_id = %video_id, user_id = %user_id, "Video record deleted");

    Ok(StatusCode::NO_CONTENT)
}
