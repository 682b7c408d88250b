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

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn test_mark_attendance_upserts_a_single_record() {
    let (app, state) = make_test_app().await;
    let token = admin_token();
    let m = member::Model::create(state.db(), "Emma Johnson").await.unwrap();

    let body = serde_json::json!({
        "member_id": m.id,
        "date": "2025-06-01",
        "status": "absent",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/attendance/mark")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "absent");
    assert_eq!(json["data"]["mode"], "manual");
    assert_eq!(json["data"]["member_name"], "Emma Johnson");

    // re-mark the same member and date with a different status
    let body = serde_json::json!({
        "member_id": m.id,
        "date": "2025-06-01",
        "status": "late",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/attendance/mark")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let count = attendance_record::Entity::find()
        .filter(attendance_record::Column::MemberId.eq(m.id))
        .filter(attendance_record::Column::Date.eq(date()))
        .count(state.db())
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        state.ledger().get_status(m.id, date()).await.unwrap(),
        Some(AttendanceStatus::Late)
    );
}

#[tokio::test]
async fn test_mark_attendance_unknown_member_is_404() {
    let (app, _state) = make_test_app().await;
    let token = admin_token();

    let body = serde_json::json!({
        "member_id": 999,
        "date": "2025-06-01",
        "status": "present",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/attendance/mark")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = read_json(resp).await;
    assert_eq!(json["message"], "Member not found");
}

#[tokio::test]
async fn test_stats_count_the_whole_roster() {
    let (app, state) = make_test_app().await;
    let token = admin_token();

    let a = member::Model::create(state.db(), "Emma Johnson").await.unwrap();
    let b = member::Model::create(state.db(), "John Smith").await.unwrap();
    let _c = member::Model::create(state.db(), "Sarah Davis").await.unwrap();

    state
        .ledger()
        .set_status(a.id, date(), AttendanceStatus::Present, None, CheckInMode::Manual)
        .await
        .unwrap();
    state
        .ledger()
        .set_status(b.id, date(), AttendanceStatus::Late, None, CheckInMode::Manual)
        .await
        .unwrap();

    let req = Request::builder()
        .method("GET")
        .uri("/api/attendance/stats?date=2025-06-01")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["data"]["present"], 1);
    assert_eq!(json["data"]["absent"], 0);
    assert_eq!(json["data"]["late"], 1);
    assert_eq!(json["data"]["total"], 3);
}

#[tokio::test]
async fn test_list_attendance_joins_member_names() {
    let (app, state) = make_test_app().await;
    let token = admin_token();

    let m = member::Model::create(state.db(), "Michael Brown").await.unwrap();
    state
        .ledger()
        .set_status(m.id, date(), AttendanceStatus::Present, None, CheckInMode::Manual)
        .await
        .unwrap();
    // a record on another date must not show up
    let other = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
    state
        .ledger()
        .set_status(m.id, other, AttendanceStatus::Absent, None, CheckInMode::Manual)
        .await
        .unwrap();

    let req = Request::builder()
        .method("GET")
        .uri("/api/attendance?date=2025-06-01")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["member_name"], "Michael Brown");
    assert_eq!(records[0]["date"], "2025-06-01");
    assert_eq!(records[0]["status"], "present");
}
