//! Application state shared across Axum route handlers.

use sea_orm::DatabaseConnection;
use services::ledger::DbLedger;
use services::session::SessionIssuer;
use std::sync::Arc;

/// Central application state: the database connection and the single
/// check-in session slot. Cloning is cheap; both members are handles.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    sessions: Arc<SessionIssuer>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            sessions: Arc::new(SessionIssuer::new()),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Ledger view over the shared connection.
    pub fn ledger(&self) -> DbLedger {
        DbLedger::new(self.db.clone())
    }
}
