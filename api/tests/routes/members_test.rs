use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tower::ServiceExt;

use crate::helpers::app::{admin_token, make_test_app, read_json};
use db::models::{attendance_record, member};
use services::ledger::{AttendanceLedger, AttendanceStatus, CheckInMode};

#[tokio::test]
async fn test_create_and_list_members() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let body = serde_json::json!({ "name": "Emma Johnson" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/members")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = read_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Member added");
    assert_eq!(json["data"]["name"], "Emma Johnson");
    assert!(json["data"]["id"].as_i64().is_some());

    let req = Request::builder()
        .method("GET")
        .uri("/api/members")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Emma Johnson"]);
}

#[tokio::test]
async fn test_create_member_rejects_blank_names() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    for bad in ["", "   "] {
        let body = serde_json::json!({ "name": bad });
        let req = Request::builder()
            .method("POST")
            .uri("/api/members")
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_delete_member_cascades_attendance_records() {
    let (app, state) = make_test_app().await;
    let token = admin_token();

    let m = member::Model::create(state.db(), "John Smith").await.unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    state
        .ledger()
        .set_status(m.id, date, AttendanceStatus::Present, None, CheckInMode::Manual)
        .await
        .unwrap();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/members/{}", m.id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(!member::Model::exists(state.db(), m.id).await.unwrap());
    let orphans = attendance_record::Entity::find()
        .filter(attendance_record::Column::MemberId.eq(m.id))
        .count(state.db())
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    // second delete finds nothing
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/members/{}", m.id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
