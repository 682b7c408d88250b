use api::routes::routes;
use api::state::AppState;
use axum::{Router, body::Body, http::Request, response::Response};
use db::test_utils::setup_test_db;
use serde_json::Value;
use std::convert::Infallible;
use tower::util::BoxCloneService;
use util::config::AppConfig;

fn init_test_config() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        AppConfig::set_jwt_secret("test-secret");
        AppConfig::set_jwt_duration_minutes(60);
        AppConfig::set_admin_username("admin");
        AppConfig::set_admin_password("super-secret");
        AppConfig::set_frontend_url("http://localhost:5173/attendance");
        AppConfig::set_session_ttl_hours(24);
    });
}

/// Boxed router over a fresh in-memory database, plus the state so tests
/// can seed and inspect it directly.
pub async fn make_test_app() -> (
    BoxCloneService<Request<Body>, Response, Infallible>,
    AppState,
) {
    init_test_config();

    let db = setup_test_db().await;
    let state = AppState::new(db);

    let router: Router = Router::new()
        .nest("/api", routes())
        .with_state(state.clone());

    (BoxCloneService::new(router), state)
}

pub fn admin_token() -> String {
    init_test_config();
    api::auth::generate_jwt().0
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
