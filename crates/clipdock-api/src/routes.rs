//! Route configuration and middleware stack.

use crate::handlers::{thumbnails, video_meta, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Slack on top of the handler's size ceiling so oversize uploads reach the
/// handler and fail with 400 rather than being cut off mid-body.
const BODY_LIMIT_SLACK_BYTES: usize = 256 * 1024;

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn setup_cors(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    } else {
        let parsed: Result<Vec<HeaderValue>, _> =
            origins.iter().map(|o| o.parse::<HeaderValue>()).collect();
        CorsLayer::new()
            .allow_origin(parsed.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Build the application router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state.config.cors_origins)?;
    let body_limit = state.config.max_video_size_bytes + BODY_LIMIT_SLACK_BYTES;

    let router = Router::new()
        .route("/health", get(health))
        .route(
            "/api/video_meta",
            post(video_meta::create_video).get(video_meta::list_videos),
        )
        .route(
            "/api/video_meta/{video_id}",
            get(video_meta::get_video).delete(video_meta::delete_video),
        )
        .route("/api/thumbnail/{video_id}", post(thumbnails::upload_thumbnail))
        .route("/api/thumbnails/{video_id}", get(thumbnails::get_thumbnail))
        .route("/api/video/{video_id}", post(video_upload::upload_video))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
