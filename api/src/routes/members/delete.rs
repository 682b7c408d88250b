use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{response::ApiResponse, state::AppState};
use services::ledger::AttendanceLedger;

/// DELETE /api/members/{member_id}
///
/// Removes the member together with all of their attendance records.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.ledger().remove_member(member_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Member removed")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Member not found")),
        ),
        Err(e) => {
            tracing::error!("failed to remove member {member_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to remove member")),
            )
        }
    }
}
