use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use crate::helpers::app::{admin_token, make_test_app, read_json};

#[tokio::test]
async fn test_login_with_configured_credentials() {
    let (app, _state) = make_test_app().await;

    let body = serde_json::json!({ "username": "admin", "password": "super-secret" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].as_str().is_some());
    assert!(json["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let (app, _state) = make_test_app().await;

    let body = serde_json::json!({ "username": "admin", "password": "wrong" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = read_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_admin_routes_require_a_token() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/members")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_garbage_tokens() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/members")
        .header("Authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_accept_a_valid_token() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/members")
        .header("Authorization", format!("Bearer {}", admin_token()))
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
