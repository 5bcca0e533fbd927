//! In-process repository implementation
//!
//! Keeps videos in a map guarded by an async lock. Ids come from a counter
//! that starts at 1 and is never rewound, matching `SERIAL` semantics.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{NewVideo, Video};
use crate::error::{CoreError, Result};
use crate::repository::VideoRepository;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Video>,
    last_id: i32,
}

/// Repository that never leaves the process
#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    table: RwLock<Table>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn list_videos(&self) -> Result<Vec<Video>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_video(&self, id: i32) -> Result<Video> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or(CoreError::VideoNotFound(id))
    }

    async fn add_video(&self, video: &NewVideo) -> Result<i32> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| CoreError::Storage("id sequence exhausted".to_string()))?;

        table.last_id = id;
        table.rows.insert(id, video.clone().with_id(id));
        Ok(id)
    }

    async fn update_video(&self, video: &Video) -> Result<u64> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&video.id) {
            Some(row) => {
                row.title.clone_from(&video.title);
                row.description.clone_from(&video.description);
                row.url.clone_from(&video.url);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_video(&self, id: i32) -> Result<u64> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryVideoRepository::new();
        assert!(repo.list_videos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let repo = InMemoryVideoRepository::new();
        let first = repo.add_video(&NewVideo::new("a", "b", "c")).await.unwrap();
        let second = repo.add_video(&NewVideo::new("d", "e", "f")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(
            repo.get_video(first).await.unwrap(),
            NewVideo::new("a", "b", "c").with_id(first)
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let err = repo.get_video(5).await.unwrap_err();
        assert!(matches!(err, CoreError::VideoNotFound(5)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryVideoRepository::new();
        let id = repo.add_video(&NewVideo::new("a", "b", "c")).await.unwrap();

        let updated = NewVideo::new("a2", "b2", "c2").with_id(id);
        assert_eq!(repo.update_video(&updated).await.unwrap(), 1);
        assert_eq!(repo.get_video(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_affects_nothing() {
        let repo = InMemoryVideoRepository::new();
        let ghost = NewVideo::new("a", "b", "c").with_id(404);
        assert_eq!(repo.update_video(&ghost).await.unwrap(), 0);
        assert!(repo.list_videos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let repo = InMemoryVideoRepository::new();
        let id = repo.add_video(&NewVideo::new("a", "b", "c")).await.unwrap();

        assert_eq!(repo.remove_video(id).await.unwrap(), 1);
        assert_eq!(repo.remove_video(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryVideoRepository::new();
        let id = repo.add_video(&NewVideo::new("a", "b", "c")).await.unwrap();
        repo.remove_video(id).await.unwrap();

        let next = repo.add_video(&NewVideo::new("a", "b", "c")).await.unwrap();
        assert!(next > id);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let repo = Arc::new(InMemoryVideoRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.add_video(&NewVideo::new(format!("v{i}"), "", ""))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 16);
        assert_eq!(repo.list_videos().await.unwrap().len(), 16);
    }
}
