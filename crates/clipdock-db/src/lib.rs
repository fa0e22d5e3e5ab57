//! Clipdock database library
//!
//! Video metadata persistence behind the [`VideoRepository`] trait, with a
//! Postgres adapter for production and an in-memory adapter for tests and
//! storage-free development.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use uuid::Uuid;

pub use memory::InMemoryVideoRepository;
pub use postgres::{run_migrations, PgVideoRepository};

/// CRUD over video metadata records.
///
/// A video's owner never changes after creation; the only post-create
/// mutations are the URL fields. Concurrent URL updates for the same record
/// are last-write-wins; no transactional guarantee is provided.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a new record owned by `user_id`.
    async fn create(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
    ) -> Result<Video, AppError>;

    /// Fetch one record by id.
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// All records owned by `user_id`, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;

    /// Set the thumbnail URL. Returns the updated record, or `None` if the
    /// record no longer exists.
    async fn set_thumbnail_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError>;

    /// Set the video URL field (the storage object key). Returns the updated
    /// record, or `None` if the record no longer exists.
    async fn set_video_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError>;

    /// Delete a record. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
