//! Domain models for the video catalog

use serde::{Deserialize, Serialize};

/// A video record as stored in the `videos` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Store-assigned identifier, immutable once created
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form, not validated as a URI
    #[serde(default)]
    pub url: String,
}

/// Payload for creating a video; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

impl NewVideo {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Attach a store-assigned id
    pub fn with_id(self, id: i32) -> Video {
        Video {
            id,
            title: self.title,
            description: self.description,
            url: self.url,
        }
    }
}

impl From<Video> for NewVideo {
    fn from(video: Video) -> Self {
        Self {
            title: video.title,
            description: video.description,
            url: video.url,
        }
    }
}
