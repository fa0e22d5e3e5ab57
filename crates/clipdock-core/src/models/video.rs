use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video metadata record.
///
/// `user_id` is fixed at creation; only the URL fields are mutated afterwards
/// (by the thumbnail and video upload handlers). `video_url` holds the object
/// storage key of the published asset, not a fetchable URL; the read path
/// exchanges it for a presigned URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a video record.
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: String,
}

/// Wire representation of a video record.
///
/// Identical in shape to [`Video`]; exists so read handlers can substitute
/// the stored object key with a presigned playback URL without mutating the
/// domain record.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        VideoResponse {
            id: video.id,
            user_id: video.user_id,
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> Video {
        Video {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t".to_string(),
            description: "d".to_string(),
            thumbnail_url: None,
            video_url: Some("landscape/abc.mp4".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_preserves_record_fields() {
        let video = sample_video();
        let response = VideoResponse::from(video.clone());
        assert_eq!(response.id, video.id);
        assert_eq!(response.user_id, video.user_id);
        assert_eq!(response.video_url, video.video_url);
    }

    #[test]
    fn response_serializes_null_urls() {
        let mut video = sample_video();
        video.video_url = None;
        let json = serde_json::to_value(VideoResponse::from(video)).expect("serialize");
        assert!(json.get("video_url").expect("field present").is_null());
        assert!(json.get("thumbnail_url").expect("field present").is_null());
    }
}
