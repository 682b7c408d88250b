use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::auth::{AuthUser, Claims};
use crate::response::ApiResponse;
use util::config;

/// Rejects the request unless it carries a valid administrator bearer
/// token. On success the decoded claims are available to handlers as
/// `Extension<AuthUser>`.
pub async fn allow_admin(mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return reject(StatusCode::UNAUTHORIZED, "Authorization token is missing");
    };

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) if data.claims.admin => {
            req.extensions_mut().insert(AuthUser(data.claims));
            next.run(req).await
        }
        Ok(_) => reject(StatusCode::FORBIDDEN, "Administrator access required"),
        Err(_) => reject(StatusCode::UNAUTHORIZED, "Invalid or expired token"),
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
