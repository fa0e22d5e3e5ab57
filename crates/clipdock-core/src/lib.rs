//! Clipdock core library
//!
//! Shared foundation for the clipdock video-hosting backend: the unified
//! error taxonomy, environment-driven configuration, and domain models.

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
