use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

pub mod common;
mod delete;
mod get;
mod post;

pub use delete::delete_member;
pub use get::list_members;
pub use post::create_member;

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members))
        .route("/", post(create_member))
        .route("/{member_id}", delete(delete_member))
}
