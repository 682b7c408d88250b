use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::RngCore;
use std::sync::RwLock;

/// A time-bounded capability that authorizes self check-ins for one date.
///
/// The token is the whole credential: anyone holding an unexpired token can
/// mark any roster member present for `date`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckInSession {
    pub token: String,
    pub date: NaiveDate,
    pub expires_at: DateTime<Utc>,
}

impl CheckInSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Shareable link for this session. Rendering it as a QR code is the
    /// front end's job.
    pub fn share_url(&self, base_url: &str) -> String {
        format!("{}?session={}", base_url.trim_end_matches('/'), self.token)
    }
}

/// Owns the single active check-in session.
///
/// Policy: the last issued session replaces any prior one, so every link
/// generated from an older token is invalidated at issue time. Sessions are
/// not persisted; a process restart simply forces re-issuance. There is no
/// explicit revocation — expiry is checked lazily by the validator.
#[derive(Debug, Default)]
pub struct SessionIssuer {
    current: RwLock<Option<CheckInSession>>,
}

impl SessionIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh session for `date`, replacing the previous one.
    pub fn issue(&self, date: NaiveDate, now: DateTime<Utc>, ttl: Duration) -> CheckInSession {
        let session = CheckInSession {
            token: generate_token(),
            date,
            expires_at: now + ttl,
        };
        *self.current.write().expect("session lock poisoned") = Some(session.clone());
        session
    }

    /// Snapshot of the active session, if any.
    pub fn current(&self) -> Option<CheckInSession> {
        self.current.read().expect("session lock poisoned").clone()
    }
}

fn generate_token() -> String {
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
