//! Clipdock storage library
//!
//! Object-storage abstraction for published video assets. Provides the
//! `Storage` trait plus S3 (`object_store`) and local-filesystem backends.
//!
//! # Key format
//!
//! Published videos live under `{aspect_bucket}/{random_name}{ext}` where
//! `aspect_bucket` is `landscape`, `portrait`, or `other` and `random_name`
//! is 32 random bytes in URL-safe base64. Keys must not contain `..` or a
//! leading `/`. Key and extension helpers live in the `keys` module.

pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
