//! Data-access abstraction for the `videos` table
//!
//! Controllers depend only on [`VideoRepository`], so the store behind it can
//! change without touching HTTP-facing code.

use crate::domain::{NewVideo, Video};
use crate::error::Result;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryVideoRepository;
pub use postgres::PostgresVideoRepository;

/// Video repository trait
///
/// Every method is a single independent statement against the store.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// All videos, unordered. An empty table yields an empty vector.
    async fn list_videos(&self) -> Result<Vec<Video>>;

    /// The video with `id`, or `CoreError::VideoNotFound`
    async fn get_video(&self, id: i32) -> Result<Video>;

    /// Insert a video and return the id assigned by the store
    async fn add_video(&self, video: &NewVideo) -> Result<i32>;

    /// Replace title, description and url of `video.id`.
    /// Returns rows affected; 0 when no row matched.
    async fn update_video(&self, video: &Video) -> Result<u64>;

    /// Delete the video with `id`. Returns rows affected; 0 when no row matched.
    async fn remove_video(&self, id: i32) -> Result<u64>;
}
