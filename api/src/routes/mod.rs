//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → mock administrator login (public)
//! - `/members` → roster management (admin-only)
//! - `/attendance` → attendance sheet, stats and the check-in session
//!   flow; the check-in endpoints themselves are public, everything else
//!   is admin-only

use axum::{Router, middleware::from_fn};

use crate::auth::guards::allow_admin;
use crate::state::AppState;

pub mod attendance;
pub mod auth;
pub mod health;
pub mod members;

/// Builds the complete application router. The returned router still
/// needs `AppState` supplied via `with_state` by the caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest(
            "/members",
            members::member_routes().route_layer(from_fn(allow_admin)),
        )
        .nest("/attendance", attendance::attendance_routes())
}
