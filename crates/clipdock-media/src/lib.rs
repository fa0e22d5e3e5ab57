//! Clipdock media library
//!
//! Delegates heavy media work to external tools behind a narrow interface:
//! dimension probing (ffprobe) and fast-start remuxing (ffmpeg), both as
//! timeout-bounded subprocess calls, plus aspect-ratio classification.

pub mod aspect;
pub mod tool;

pub use aspect::AspectRatio;
pub use tool::{FfmpegTool, MediaTool, MediaToolError, PROCESSED_SUFFIX};
