use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::routes::members::common::MemberResponse;
use db::models::attendance_record::{AttendanceStatus, CheckInMode};
use db::models::{attendance_record, member};
use services::session::CheckInSession;
use util::config;

#[derive(Debug, Serialize)]
pub struct AttendanceRecordResponse {
    pub member_id: i64,
    pub member_name: Option<String>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<String>,
    pub mode: CheckInMode,
}

impl AttendanceRecordResponse {
    pub fn from_record(record: attendance_record::Model, member: Option<member::Model>) -> Self {
        Self {
            member_id: record.member_id,
            member_name: member.map(|m| m.name),
            date: record.date,
            status: record.status,
            checked_in_at: record.checked_in_at.map(|t| t.to_rfc3339()),
            mode: record.mode,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub date: NaiveDate,
    pub expires_at: String,
    pub check_in_url: String,
}

impl From<CheckInSession> for SessionResponse {
    fn from(s: CheckInSession) -> Self {
        let check_in_url = s.share_url(&config::frontend_url());
        Self {
            check_in_url,
            token: s.token,
            date: s.date,
            expires_at: s.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionReq {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceReq {
    pub member_id: i64,
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub struct CheckInReq {
    pub token: String,
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckInData {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CheckInViewQuery {
    pub session: String,
}

#[derive(Debug, Serialize)]
pub struct CheckInViewResponse {
    pub date: NaiveDate,
    pub members: Vec<MemberResponse>,
}
