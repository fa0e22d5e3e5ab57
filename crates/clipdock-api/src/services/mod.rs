pub mod thumbnail_store;

pub use thumbnail_store::{InMemoryThumbnailStore, StoredThumbnail, ThumbnailStore};
