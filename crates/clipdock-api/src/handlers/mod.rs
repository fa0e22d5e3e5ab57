//! HTTP request handlers

pub mod thumbnails;
pub mod video_meta;
pub mod video_upload;
