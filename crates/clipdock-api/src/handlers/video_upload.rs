//! Video upload and publish pipeline.
//!
//! Authorize -> validate multipart -> persist temp -> probe aspect ratio ->
//! fast-start remux -> push to object storage -> update metadata -> cleanup.
//! External-process and storage failures propagate as 500s; no retries.

use crate::auth::CurrentUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, validate_content_type, validate_file_size};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use clipdock_core::AppError;
use clipdock_media::AspectRatio;
use clipdock_storage::keys::{media_type_to_ext, object_key, random_asset_name};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Transient upload artifacts, deleted on every exit path when the handler
/// scope unwinds - success, validation failure, or external-process error.
struct TempArtifacts {
    paths: Vec<PathBuf>,
}

impl TempArtifacts {
    fn new() -> Self {
        Self { paths: Vec::new() }
    }

    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }
}

impl Drop for TempArtifacts {
    fn drop(&mut self) {
        for path in &self.paths {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp file");
                }
            }
        }
    }
}

/// `POST /api/video/{video_id}` - multipart field `video`.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(video_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<StatusCode, HttpAppError> {
    // Authorize before touching the body.
    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if video.user_id != user_id {
        return Err(AppError::Forbidden("Not authorized to upload this video".to_string()).into());
    }

    tracing::info!(video_id = %video_id, user_id = %user_id, "Uploading video");

    let (data, content_type) = extract_multipart_file(multipart, "video").await?;

    validate_file_size(data.len(), state.config.max_video_size_bytes)?;
    validate_content_type(&content_type, &state.config.video_allowed_content_types)?;

    let extension = media_type_to_ext(&content_type);
    let file_name = random_asset_name(&extension);
    let raw_path = state.config.temp_dir.join(&file_name);

    let mut artifacts = TempArtifacts::new();
    artifacts.track(raw_path.clone());

    tokio::fs::write(&raw_path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write temp file: {}", e)))?;

    let (width, height) = state.media_tool.probe_dimensions(&raw_path).await?;
    let aspect = AspectRatio::classify(width, height);

    let processed_path = state.media_tool.fast_start_remux(&raw_path).await?;
    artifacts.track(processed_path.clone());

    // Push the remuxed bytes, not the raw upload.
    let processed_data = tokio::fs::read(&processed_path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read processed file: {}", e)))?;

    let key = object_key(aspect.as_str(), &file_name);
    state
        .storage
        .put_object(&key, &content_type, processed_data)
        .await?;

    state
        .videos
        .set_video_url(video_id, key.clone())
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    tracing::info!(
        video_id = %video_id,
        key = %key,
        aspect = %aspect,
        "Video published"
    );

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_artifacts_remove_tracked_files_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kept = dir.path().join("kept.mp4");
        let tracked = dir.path().join("tracked.mp4");
        std::fs::write(&kept, b"x").expect("write");
        std::fs::write(&tracked, b"x").expect("write");

        {
            let mut artifacts = TempArtifacts::new();
            artifacts.track(tracked.clone());
        }

        assert!(kept.exists());
        assert!(!tracked.exists());
    }

    #[test]
    fn temp_artifacts_tolerate_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut artifacts = TempArtifacts::new();
        artifacts.track(dir.path().join("never-written.mp4"));
        drop(artifacts);
    }
}
