//! Application state

use std::sync::Arc;

use video_catalog_core::repository::VideoRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Video store; handlers see only the repository contract
    pub videos: Arc<dyn VideoRepository>,
}

impl AppState {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }
}
