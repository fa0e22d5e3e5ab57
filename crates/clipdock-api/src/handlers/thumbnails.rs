//! Thumbnail upload and fetch.
//!
//! Thumbnails live in the injected [`ThumbnailStore`] (process memory by
//! default) and are served straight from it, marked non-cacheable so a
//! re-upload is visible immediately.

use crate::auth::CurrentUser;
use crate::error::HttpAppError;
use crate::services::StoredThumbnail;
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, validate_content_type, validate_file_size};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use clipdock_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// `POST /api/thumbnail/{video_id}` - multipart field `thumbnail`.
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<StatusCode, HttpAppError> {
    tracing::info!(video_id = %video_id, user_id = %user_id, "Uploading thumbnail");

    let (data, content_type) = extract_multipart_file(multipart, "thumbnail").await?;

    validate_file_size(data.len(), state.config.max_thumbnail_size_bytes)?;
    validate_content_type(&content_type, &state.config.thumbnail_allowed_content_types)?;

    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if video.user_id != user_id {
        return Err(
            AppError::Forbidden("The user is not the owner of the video".to_string()).into(),
        );
    }

    state
        .thumbnails
        .put(video_id, StoredThumbnail { data, content_type })
        .await;

    let thumbnail_url = format!(
        "{}/api/thumbnails/{}",
        state.config.public_base_url.trim_end_matches('/'),
        video_id
    );

    state
        .videos
        .set_thumbnail_url(video_id, thumbnail_url)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    Ok(StatusCode::OK)
}

/// `GET /api/thumbnails/{video_id}` - raw bytes with the stored MIME type.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    let thumbnail = state
        .thumbnails
        .get(video_id)
        .await
        .ok_or_else(|| AppError::NotFound("Couldn't find thumbnail".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, thumbnail.content_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        thumbnail.data,
    )
        .into_response())
}
