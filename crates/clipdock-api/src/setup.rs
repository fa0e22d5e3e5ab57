//! Application wiring: database, storage, media tooling, routes.

use crate::auth::TokenService;
use crate::routes::build_router;
use crate::services::InMemoryThumbnailStore;
use crate::state::AppState;
use axum::Router;
use clipdock_core::{Config, StorageBackend};
use clipdock_db::{run_migrations, PgVideoRepository, VideoRepository};
use clipdock_media::{FfmpegTool, MediaTool};
use clipdock_storage::{LocalStorage, S3Storage, Storage};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>, anyhow::Error> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| anyhow::anyhow!("S3_BUCKET is required for the s3 backend"))?;
            let region = config
                .s3_region
                .clone()
                .ok_or_else(|| anyhow::anyhow!("S3_REGION is required for the s3 backend"))?;
            let storage = S3Storage::new(bucket, region, config.s3_endpoint.clone())?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Local => {
            let path = config.local_storage_path.clone().ok_or_else(|| {
                anyhow::anyhow!("LOCAL_STORAGE_PATH is required for the local backend")
            })?;
            let base_url = config
                .local_storage_base_url
                .clone()
                .unwrap_or_else(|| format!("{}/media", config.public_base_url));
            let storage = LocalStorage::new(path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}

/// Connect collaborators and build the application state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await?;

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let videos: Arc<dyn VideoRepository> = Arc::new(PgVideoRepository::new(pool));
    let storage = setup_storage(&config).await?;
    let media_tool: Arc<dyn MediaTool> = Arc::new(FfmpegTool::new(
        config.ffmpeg_path.clone(),
        config.ffprobe_path.clone(),
        Duration::from_secs(config.media_tool_timeout_secs),
    )?);
    let tokens = TokenService::new(&config.jwt_secret, config.token_expiry_hours);

    let state = Arc::new(AppState {
        config,
        tokens,
        videos,
        storage,
        thumbnails: Arc::new(InMemoryThumbnailStore::new()),
        media_tool,
    });

    let router = build_router(state.clone())?;

    Ok((state, router))
}
