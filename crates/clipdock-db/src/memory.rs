//! In-memory adapter for the video repository.
//!
//! Process-local, no persistence. Used by the API integration tests and for
//! database-free development runs.

use async_trait::async_trait;
use chrono::Utc;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::VideoRepository;

#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
    ) -> Result<Video, AppError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        };

        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn set_thumbnail_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError> {
        let mut videos = self.videos.write().await;
        Ok(videos.get_mut(&id).map(|video| {
            video.thumbnail_url = Some(url);
            video.updated_at = Utc::now();
            video.clone()
        }))
    }

    async fn set_video_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError> {
        let mut videos = self.videos.write().await;
        Ok(videos.get_mut(&id).map(|video| {
            video.video_url = Some(url);
            video.updated_at = Utc::now();
            video.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.videos.write().await.remove(&id).is_some())
    }
}
