use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::auth::guards::allow_admin;
use crate::state::AppState;

mod common;
mod get;
mod post;

pub use get::{check_in_view, get_current_session, get_stats, list_attendance};
pub use post::{check_in, create_session, mark_attendance};

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_attendance).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/mark",
            post(mark_attendance).route_layer(from_fn(allow_admin)),
        )
        .route("/stats", get(get_stats).route_layer(from_fn(allow_admin)))
        .route(
            "/sessions",
            post(create_session).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/sessions/current",
            get(get_current_session).route_layer(from_fn(allow_admin)),
        )
        // Public by design: participants reach these from the shared link.
        .route("/check-in", get(check_in_view).post(check_in))
}
