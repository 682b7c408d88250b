use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::common::{
    AttendanceRecordResponse, CheckInViewQuery, CheckInViewResponse, DateQuery, SessionResponse,
};
use crate::routes::members::common::MemberResponse;
use crate::{response::ApiResponse, state::AppState};
use db::models::{attendance_record, member};
use services::checkin::validate_link;
use services::ledger::{AttendanceLedger, AttendanceStats};

/// GET /api/attendance?date=YYYY-MM-DD
///
/// Records for one date, joined with member names. Defaults to today.
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<AttendanceRecordResponse>>>) {
    let date = q.date.unwrap_or_else(|| Utc::now().date_naive());

    match attendance_record::Entity::find()
        .filter(attendance_record::Column::Date.eq(date))
        .find_also_related(member::Entity)
        .all(state.db())
        .await
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter()
                    .map(|(record, m)| AttendanceRecordResponse::from_record(record, m))
                    .collect(),
                "Attendance fetched",
            )),
        ),
        Err(e) => {
            tracing::error!("failed to fetch attendance for {date}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to fetch attendance")),
            )
        }
    }
}

/// GET /api/attendance/stats?date=YYYY-MM-DD
pub async fn get_stats(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> (StatusCode, Json<ApiResponse<AttendanceStats>>) {
    let date = q.date.unwrap_or_else(|| Utc::now().date_naive());

    match state.ledger().stats_for_date(date).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Attendance stats fetched")),
        ),
        Err(e) => {
            tracing::error!("failed to compute stats for {date}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to compute attendance stats")),
            )
        }
    }
}

/// GET /api/attendance/sessions/current
pub async fn get_current_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Option<SessionResponse>>>) {
    match state.sessions().current() {
        Some(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(SessionResponse::from(session)),
                "Active check-in session",
            )),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No active check-in session")),
        ),
    }
}

/// GET /api/attendance/check-in?session=TOKEN
///
/// Opens the self check-in view: validates the link token and returns the
/// roster for the name-selection step. Invalid, expired and unknown tokens
/// all get the same answer.
pub async fn check_in_view(
    State(state): State<AppState>,
    Query(q): Query<CheckInViewQuery>,
) -> (StatusCode, Json<ApiResponse<Option<CheckInViewResponse>>>) {
    let Some(date) = validate_link(state.sessions(), &q.session, Utc::now()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Check-in session is expired or invalid")),
        );
    };

    match member::Model::find_all(state.db()).await {
        Ok(members) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(CheckInViewResponse {
                    date,
                    members: members.into_iter().map(MemberResponse::from).collect(),
                }),
                "Check-in session is valid",
            )),
        ),
        Err(e) => {
            tracing::error!("failed to load roster for check-in view: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load check-in view")),
            )
        }
    }
}
