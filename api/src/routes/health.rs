use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct HealthData {
    pub status: String,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

async fn health() -> (StatusCode, Json<ApiResponse<HealthData>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthData {
                status: "ok".into(),
            },
            "Service is healthy",
        )),
    )
}
