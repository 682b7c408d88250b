//! Self check-in validation: decides whether a presented `(token, member)`
//! pair may mark attendance, then writes through the ledger.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::ledger::{AttendanceLedger, AttendanceStatus, CheckInMode, LedgerError};
use crate::session::SessionIssuer;

/// Why a check-in attempt was refused.
///
/// `SessionInvalid` covers a missing session, a mismatched token and an
/// expired session alike; callers must surface one generic message for all
/// three so a guesser cannot tell a wrong token from a stale one.
#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("check-in session is expired or invalid")]
    SessionInvalid,
    #[error("member not found")]
    MemberNotFound,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Validates the token against the active session and, on success, marks
/// the member present for the session's date. Returns that date.
///
/// Re-checking in with a valid token is idempotent: the ledger upsert
/// re-asserts `present` without creating a second record. Rejections leave
/// the ledger untouched. The token is checked before the roster so that a
/// caller without a valid token learns nothing about member ids.
pub async fn check_in<L: AttendanceLedger>(
    ledger: &L,
    issuer: &SessionIssuer,
    token: &str,
    member_id: i64,
    now: DateTime<Utc>,
) -> Result<NaiveDate, CheckInError> {
    let session = match issuer.current() {
        Some(s) if s.token == token && !s.is_expired(now) => s,
        _ => return Err(CheckInError::SessionInvalid),
    };

    if !ledger.member_exists(member_id).await? {
        return Err(CheckInError::MemberNotFound);
    }

    ledger
        .set_status(
            member_id,
            session.date,
            AttendanceStatus::Present,
            Some(now),
            CheckInMode::Qr,
        )
        .await?;

    tracing::debug!(member_id, date = %session.date, "self check-in recorded");
    Ok(session.date)
}

/// Link validation for the selection view: same acceptance rule as
/// [`check_in`], but without touching the ledger.
pub fn validate_link(issuer: &SessionIssuer, token: &str, now: DateTime<Utc>) -> Option<NaiveDate> {
    issuer
        .current()
        .filter(|s| s.token == token && !s.is_expired(now))
        .map(|s| s.date)
}
