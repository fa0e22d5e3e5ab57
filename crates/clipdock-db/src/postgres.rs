//! Postgres adapter for the video repository.

use async_trait::async_trait;
use chrono::Utc;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::VideoRepository;

/// Apply workspace migrations (the `migrations/` directory at the repo root).
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration error: {}", e)))?;
    Ok(())
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self, title, description), fields(db.table = "videos", db.operation = "insert"))]
    async fn create(
        &self,
        user_id: Uuid,
        title: String,
        description: String,
    ) -> Result<Video, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let video: Video = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (id, user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&title)
        .bind(&description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video: Option<Video> =
            sqlx::query_as::<Postgres, Video>("SELECT * FROM videos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos: Vec<Video> = sqlx::query_as::<Postgres, Video>(
            "SELECT * FROM videos WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update"))]
    async fn set_thumbnail_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError> {
        let video: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET thumbnail_url = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update"))]
    async fn set_video_url(&self, id: Uuid, url: String) -> Result<Option<Video>, AppError> {
        let video: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET video_url = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete"))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
