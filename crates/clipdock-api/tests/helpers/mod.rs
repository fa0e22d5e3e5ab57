//! Test helpers: build the router against in-memory adapters.
//!
//! The whole HTTP surface runs without Postgres or ffmpeg: videos live in
//! the in-memory repository, published assets in local storage on a temp
//! dir, and the media tool is a stub that reports fixed dimensions and
//! copies bytes for the remux step.

use async_trait::async_trait;
use axum_test::TestServer;
use clipdock_api::auth::TokenService;
use clipdock_api::routes::build_router;
use clipdock_api::services::InMemoryThumbnailStore;
use clipdock_api::state::AppState;
use clipdock_core::{Config, StorageBackend};
use clipdock_db::InMemoryVideoRepository;
use clipdock_media::{MediaTool, MediaToolError, PROCESSED_SUFFIX};
use clipdock_storage::{LocalStorage, Storage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";
pub const TEST_BASE_URL: &str = "http://localhost:4000";
pub const TEST_MEDIA_BASE_URL: &str = "http://localhost:4000/media";

/// Small enough that tests can exercise the oversize path with modest
/// payloads; the router's body-limit slack keeps such payloads reachable.
pub const TEST_MAX_VIDEO_SIZE: usize = 1 << 20; // 1 MiB
pub const TEST_MAX_THUMBNAIL_SIZE: usize = 16 * 1024; // 16 KiB

/// Media tool stub: fixed probe dimensions, byte-copying remux.
pub struct StubMediaTool {
    pub dims: (u32, u32),
}

#[async_trait]
impl MediaTool for StubMediaTool {
    async fn probe_dimensions(&self, _path: &Path) -> Result<(u32, u32), MediaToolError> {
        Ok(self.dims)
    }

    async fn fast_start_remux(&self, input: &Path) -> Result<PathBuf, MediaToolError> {
        let mut output_os = input.as_os_str().to_owned();
        output_os.push(PROCESSED_SUFFIX);
        let output = PathBuf::from(output_os);
        tokio::fs::copy(input, &output)
            .await
            .map_err(|source| MediaToolError::Spawn {
                tool: "stub",
                source,
            })?;
        Ok(output)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub temp_dir: PathBuf,
    _storage_dir: TempDir,
    _upload_temp_dir: TempDir,
}

impl TestApp {
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state.tokens.issue(user_id).expect("issue token")
    }

    /// Files currently present in the upload temp directory.
    pub fn temp_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.temp_dir)
            .expect("read temp dir")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }
}

fn test_config(temp_dir: PathBuf) -> Config {
    Config {
        server_port: 4000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        public_base_url: TEST_BASE_URL.to_string(),
        database_url: "postgresql://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 5,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        token_expiry_hours: 1,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: None,
        local_storage_base_url: Some(TEST_MEDIA_BASE_URL.to_string()),
        temp_dir,
        max_video_size_bytes: TEST_MAX_VIDEO_SIZE,
        max_thumbnail_size_bytes: TEST_MAX_THUMBNAIL_SIZE,
        video_allowed_content_types: vec!["video/mp4".to_string()],
        thumbnail_allowed_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        media_tool_timeout_secs: 10,
        presign_ttl_secs: 60,
    }
}

/// Build a test app whose stub probe reports the given dimensions.
pub async fn setup_test_app_with_dims(dims: (u32, u32)) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("storage tempdir");
    let upload_temp_dir = tempfile::tempdir().expect("upload tempdir");
    let temp_dir = upload_temp_dir.path().to_path_buf();

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(storage_dir.path(), TEST_MEDIA_BASE_URL.to_string())
            .await
            .expect("local storage"),
    );

    let config = test_config(temp_dir.clone());
    let tokens = TokenService::new(&config.jwt_secret, config.token_expiry_hours);

    let state = Arc::new(AppState {
        config,
        tokens,
        videos: Arc::new(InMemoryVideoRepository::new()),
        storage,
        thumbnails: Arc::new(InMemoryThumbnailStore::new()),
        media_tool: Arc::new(StubMediaTool { dims }),
    });

    let router = build_router(state.clone()).expect("router");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        state,
        temp_dir,
        _storage_dir: storage_dir,
        _upload_temp_dir: upload_temp_dir,
    }
}

/// Build a test app with landscape probe dimensions.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_dims((1920, 1080)).await
}
