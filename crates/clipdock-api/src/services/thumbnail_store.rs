//! Thumbnail store - ephemeral per-video thumbnail bytes.
//!
//! Behind a trait so the backing store can be swapped for a persistent or
//! distributed one without touching handler logic. The in-memory
//! implementation keeps at most one entry per video id (overwritten on
//! re-upload), never evicts, and loses everything on restart.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Raw thumbnail payload plus the MIME type it was uploaded with.
#[derive(Debug, Clone)]
pub struct StoredThumbnail {
    pub data: Bytes,
    pub content_type: String,
}

/// Key-value store of thumbnails, keyed by video id.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    async fn put(&self, video_id: Uuid, thumbnail: StoredThumbnail);

    async fn get(&self, video_id: Uuid) -> Option<StoredThumbnail>;
}

#[derive(Default)]
pub struct InMemoryThumbnailStore {
    entries: RwLock<HashMap<Uuid, StoredThumbnail>>,
}

impl InMemoryThumbnailStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThumbnailStore for InMemoryThumbnailStore {
    async fn put(&self, video_id: Uuid, thumbnail: StoredThumbnail) {
        self.entries.write().await.insert(video_id, thumbnail);
    }

    async fn get(&self, video_id: Uuid) -> Option<StoredThumbnail> {
        self.entries.read().await.get(&video_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_bytes() {
        let store = InMemoryThumbnailStore::new();
        let id = Uuid::new_v4();

        store
            .put(
                id,
                StoredThumbnail {
                    data: Bytes::from_static(b"\x89PNG"),
                    content_type: "image/png".to_string(),
                },
            )
            .await;

        let stored = store.get(id).await.expect("present");
        assert_eq!(stored.data.as_ref(), b"\x89PNG");
        assert_eq!(stored.content_type, "image/png");
    }

    #[tokio::test]
    async fn reupload_overwrites_previous_entry() {
        let store = InMemoryThumbnailStore::new();
        let id = Uuid::new_v4();

        for (bytes, mime) in [
            (&b"first"[..], "image/png"),
            (&b"second"[..], "image/jpeg"),
        ] {
            store
                .put(
                    id,
                    StoredThumbnail {
                        data: Bytes::copy_from_slice(bytes),
                        content_type: mime.to_string(),
                    },
                )
                .await;
        }

        let stored = store.get(id).await.expect("present");
        assert_eq!(stored.data.as_ref(), b"second");
        assert_eq!(stored.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn unknown_video_has_no_thumbnail() {
        let store = InMemoryThumbnailStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }
}
