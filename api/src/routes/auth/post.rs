use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use util::config;

#[derive(Debug, Deserialize)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Single-account mock login: credentials come from configuration, not a
/// user table. The failure message is identical for a wrong username and
/// a wrong password.
pub async fn login(
    Json(body): Json<LoginReq>,
) -> (StatusCode, Json<ApiResponse<Option<LoginResponse>>>) {
    if body.username == config::admin_username() && body.password == config::admin_password() {
        let (token, expires_at) = generate_jwt();
        (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(LoginResponse { token, expires_at }),
                "Login successful",
            )),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        )
    }
}
