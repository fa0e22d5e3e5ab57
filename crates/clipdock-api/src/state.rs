//! Application state.
//!
//! Collaborators are injected as trait objects so the binary can wire
//! Postgres + S3 + ffmpeg while tests wire in-memory adapters and a stub
//! media tool without touching handler code.

use crate::auth::TokenService;
use crate::services::ThumbnailStore;
use clipdock_core::Config;
use clipdock_db::VideoRepository;
use clipdock_media::MediaTool;
use clipdock_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub media_tool: Arc<dyn MediaTool>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
