//! PostgreSQL repository implementation

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgRow},
    Row,
};
use tracing::debug;

use crate::domain::{NewVideo, Video};
use crate::error::{CoreError, Result};
use crate::repository::VideoRepository;

const LIST_VIDEOS: &str = "SELECT id, title, description, url FROM videos";
const GET_VIDEO: &str = "SELECT id, title, description, url FROM videos WHERE id = $1";
const INSERT_VIDEO: &str =
    "INSERT INTO videos (title, description, url) VALUES ($1, $2, $3) RETURNING id";
const UPDATE_VIDEO: &str = "UPDATE videos SET title = $1, description = $2, url = $3 WHERE id = $4";
const DELETE_VIDEO: &str = "DELETE FROM videos WHERE id = $1";

/// Repository backed by the `videos` table
#[derive(Clone)]
pub struct PostgresVideoRepository {
    pool: PgPool,
}

impl PostgresVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_video(row: &PgRow) -> Result<Video> {
    Ok(Video {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        url: row.try_get("url")?,
    })
}

#[async_trait]
impl VideoRepository for PostgresVideoRepository {
    async fn list_videos(&self) -> Result<Vec<Video>> {
        let rows = sqlx::query(LIST_VIDEOS).fetch_all(&self.pool).await?;
        debug!("Fetched {} videos", rows.len());

        rows.iter().map(row_to_video).collect()
    }

    async fn get_video(&self, id: i32) -> Result<Video> {
        let row = sqlx::query(GET_VIDEO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => row_to_video(&row),
            None => Err(CoreError::VideoNotFound(id)),
        }
    }

    async fn add_video(&self, video: &NewVideo) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(INSERT_VIDEO)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.url)
            .fetch_one(&self.pool)
            .await?;

        debug!("Inserted video {}", id);
        Ok(id)
    }

    async fn update_video(&self, video: &Video) -> Result<u64> {
        let result = sqlx::query(UPDATE_VIDEO)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.url)
            .bind(video.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn remove_video(&self, id: i32) -> Result<u64> {
        let result = sqlx::query(DELETE_VIDEO)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
