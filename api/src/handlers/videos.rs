//! Video CRUD handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use video_catalog_core::domain::{NewVideo, Video};

/// Create video response
#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub id: i32,
}

/// Update video response
#[derive(Debug, Serialize)]
pub struct UpdateVideoResponse {
    #[serde(rename = "rows updated")]
    pub rows_updated: u64,
}

/// Delete video response
#[derive(Debug, Serialize)]
pub struct DeleteVideoResponse {
    #[serde(rename = "deleted rows:")]
    pub rows_deleted: u64,
}

/// List all videos
pub async fn list_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<Video>>> {
    let videos = state.videos.list_videos().await?;
    Ok(Json(videos))
}

/// Get video by ID
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Video>> {
    let id = parse_id(&id)?;

    match state.videos.get_video(id).await {
        Ok(video) => Ok(Json(video)),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound("not found".to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Create a video; any `id` in the body is ignored
pub async fn create_video(
    State(state): State<AppState>,
    payload: Result<Json<NewVideo>, JsonRejection>,
) -> ApiResult<Json<CreateVideoResponse>> {
    let Json(video) = payload.map_err(json_error)?;

    let id = state.videos.add_video(&video).await?;
    Ok(Json(CreateVideoResponse { id }))
}

/// Replace title, description and url of an existing video
pub async fn update_video(
    State(state): State<AppState>,
    payload: Result<Json<Video>, JsonRejection>,
) -> ApiResult<Json<UpdateVideoResponse>> {
    let Json(video) = payload.map_err(json_error)?;

    let rows_updated = state.videos.update_video(&video).await?;
    Ok(Json(UpdateVideoResponse { rows_updated }))
}

/// Delete video by ID
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteVideoResponse>> {
    let id = parse_id(&id)?;

    let rows_deleted = state.videos.remove_video(id).await?;
    Ok(Json(DeleteVideoResponse { rows_deleted }))
}

// Helper functions

fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::BadRequest("wrong id".to_string()))
}

fn json_error(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("error JSON body: {}", rejection.body_text()))
}
