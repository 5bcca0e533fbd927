//! API handlers

pub mod videos;

use axum::Json;
use serde::Serialize;

/// Liveness payload; says nothing about the video store
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
