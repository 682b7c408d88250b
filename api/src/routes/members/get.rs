use axum::{Json, extract::State, http::StatusCode};

use super::common::MemberResponse;
use crate::{response::ApiResponse, state::AppState};
use db::models::member;

/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<MemberResponse>>>) {
    match member::Model::find_all(state.db()).await {
        Ok(members) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                members.into_iter().map(MemberResponse::from).collect(),
                "Members fetched",
            )),
        ),
        Err(e) => {
            tracing::error!("failed to list members: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to fetch members")),
            )
        }
    }
}
