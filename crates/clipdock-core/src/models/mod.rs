//! Domain models

mod video;

pub use video::{CreateVideoRequest, Video, VideoResponse};
