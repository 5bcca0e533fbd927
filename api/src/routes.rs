//! API route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::liveness))
        // Videos
        .route("/videos", get(handlers::videos::list_videos))
        .route("/videos/:id", get(handlers::videos::get_video))
        .route("/videos/", post(handlers::videos::create_video))
        .route("/videos/", put(handlers::videos::update_video))
        .route("/videos/:id", delete(handlers::videos::delete_video))
        // Layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
