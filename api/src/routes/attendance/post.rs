use axum::{Json, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;

use super::common::{
    AttendanceRecordResponse, CheckInData, CheckInReq, CreateSessionReq, MarkAttendanceReq,
    SessionResponse,
};
use crate::{response::ApiResponse, state::AppState};
use db::models::{attendance_record, member};
use services::checkin::{self, CheckInError};
use services::ledger::{AttendanceLedger, CheckInMode};
use util::config;

/// POST /api/attendance/sessions
///
/// Issues a fresh check-in session for the given date (default: today),
/// replacing any previous session and invalidating its links.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionReq>,
) -> (StatusCode, Json<ApiResponse<SessionResponse>>) {
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let ttl = Duration::hours(config::session_ttl_hours());

    let session = state.sessions().issue(date, Utc::now(), ttl);
    tracing::info!(%date, expires_at = %session.expires_at, "issued check-in session");

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SessionResponse::from(session),
            "Check-in session created",
        )),
    )
}

/// POST /api/attendance/mark
///
/// Manual upsert of a member's status for a date (default: today).
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(body): Json<MarkAttendanceReq>,
) -> (StatusCode, Json<ApiResponse<Option<AttendanceRecordResponse>>>) {
    let db = state.db();
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    match member::Model::exists(db, body.member_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Member not found")),
            );
        }
        Err(e) => {
            tracing::error!("failed to look up member {}: {e}", body.member_id);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to mark attendance")),
            );
        }
    }

    let now = Utc::now();
    if let Err(e) = state
        .ledger()
        .set_status(body.member_id, date, body.status, Some(now), CheckInMode::Manual)
        .await
    {
        tracing::error!("failed to mark attendance for {}: {e}", body.member_id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Failed to mark attendance")),
        );
    }

    match attendance_record::Entity::find_by_id((body.member_id, date))
        .find_also_related(member::Entity)
        .one(db)
        .await
    {
        Ok(Some((record, m))) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(AttendanceRecordResponse::from_record(record, m)),
                "Attendance marked",
            )),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Failed to mark attendance")),
        ),
    }
}

/// POST /api/attendance/check-in
///
/// Public self check-in from the shared link. All token problems surface
/// as one generic message; only an unknown member is reported distinctly.
pub async fn check_in(
    State(state): State<AppState>,
    Json(body): Json<CheckInReq>,
) -> (StatusCode, Json<ApiResponse<Option<CheckInData>>>) {
    match checkin::check_in(
        &state.ledger(),
        state.sessions(),
        &body.token,
        body.member_id,
        Utc::now(),
    )
    .await
    {
        Ok(date) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(CheckInData { date }),
                "Attendance recorded",
            )),
        ),
        Err(CheckInError::MemberNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Member not found")),
        ),
        Err(CheckInError::SessionInvalid) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Check-in session is expired or invalid")),
        ),
        Err(CheckInError::Ledger(e)) => {
            tracing::error!("check-in failed for member {}: {e}", body.member_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to record attendance")),
            )
        }
    }
}
