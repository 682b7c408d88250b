use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use super::common::{CreateMemberReq, MemberResponse};
use crate::{response::ApiResponse, state::AppState};
use db::models::member;

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    Json(body): Json<CreateMemberReq>,
) -> (StatusCode, Json<ApiResponse<Option<MemberResponse>>>) {
    if let Err(e) = body.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        );
    }
    let name = body.name.trim();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Member name is required")),
        );
    }

    match member::Model::create(state.db(), name).await {
        Ok(m) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(MemberResponse::from(m)),
                "Member added",
            )),
        ),
        Err(e) => {
            tracing::error!("failed to create member: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to add member")),
            )
        }
    }
}
