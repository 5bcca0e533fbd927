//! Core error types for the video catalog

use thiserror::Error;

/// Core error type for all repository and bootstrap operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Video not found: {0}")]
    VideoNotFound(i32),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True when the error means the requested row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::VideoNotFound(_) | CoreError::Database(sqlx::Error::RowNotFound)
        )
    }
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
