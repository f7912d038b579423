//! Integration tests for the reminder endpoints.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{TestApp, daily_water_payload};

#[tokio::test]
async fn test_create_reminder_success() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/reminders",
            Some(daily_water_payload()),
            Some(user),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = &response.body["data"];
    assert_eq!(data["kind"], "water");
    assert_eq!(data["message"], "Drink water");
    assert_eq!(data["is_active"], true);
    assert!(data["next_run_at"].is_string());
    assert_eq!(data["user_id"].as_str(), Some(user.to_string().as_str()));
}

#[tokio::test]
async fn test_requests_without_user_header_are_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/reminders", Some(daily_water_payload()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let response = app.request("GET", "/api/reminders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_invalid_payload() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let mut empty_message = daily_water_payload();
    empty_message["message"] = "".into();
    let response = app
        .request("POST", "/api/reminders", Some(empty_message), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let mut bad_mask = daily_water_payload();
    bad_mask["days_of_week"] = 200.into();
    let response = app
        .request("POST", "/api/reminders", Some(bad_mask), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Recurring without any enabled day is caught by the service.
    let mut no_days = daily_water_payload();
    no_days["days_of_week"] = serde_json::Value::Null;
    let response = app
        .request("POST", "/api/reminders", Some(no_days), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_scopes_reminders_by_owner() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let created = app.create_reminder(owner, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = app
        .request("GET", &format!("/api/reminders/{id}"), None, Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/reminders/{id}"), None, Some(stranger))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_merges_and_clears_end_date() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let mut payload = daily_water_payload();
    payload["end_date"] = "2025-06-01".into();
    let created = app.create_reminder(user, payload).await;
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["end_date"], "2025-06-01");

    // A PATCH that leaves end_date out does not touch it.
    let response = app
        .request(
            "PATCH",
            &format!("/api/reminders/{id}"),
            Some(serde_json::json!({ "message": "More water" })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "More water");
    assert_eq!(response.body["data"]["end_date"], "2025-06-01");

    // An explicit null clears it.
    let response = app
        .request(
            "PATCH",
            &format!("/api/reminders/{id}"),
            Some(serde_json::json!({ "end_date": null })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["end_date"].is_null());
}

#[tokio::test]
async fn test_toggle_and_snooze_flow() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let created = app.create_reminder(user, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/reminders/{id}/toggle"),
            Some(serde_json::json!({ "active": false })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], false);
    assert!(response.body["data"]["next_run_at"].is_null());

    let response = app
        .request(
            "POST",
            &format!("/api/reminders/{id}/snooze"),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], true);
    assert!(response.body["data"]["next_run_at"].is_string());
}

#[tokio::test]
async fn test_delete_hides_reminder_but_keeps_row() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let created = app.create_reminder(user, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = app
        .request("DELETE", &format!("/api/reminders/{id}"), None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Reminder deleted");

    let response = app
        .request("GET", &format!("/api/reminders/{id}"), None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The row survives as a soft-deleted record.
    let reminder_id = id.parse::<Uuid>().expect("uuid").into();
    let row = app.reminder_store.snapshot(reminder_id).expect("row kept");
    assert!(row.soft_deleted_at.is_some());
}

#[tokio::test]
async fn test_list_filters_by_status_and_kind() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    app.create_reminder(user, daily_water_payload()).await;
    let mut workout = daily_water_payload();
    workout["kind"] = "workout".into();
    workout["message"] = "Leg day".into();
    let toggled = app.create_reminder(user, workout).await;
    let toggled_id = toggled["id"].as_str().expect("id").to_string();

    app.request(
        "POST",
        &format!("/api/reminders/{toggled_id}/toggle"),
        Some(serde_json::json!({ "active": false })),
        Some(user),
    )
    .await;

    let response = app
        .request("GET", "/api/reminders?status=active", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().expect("array").len(), 1);
    assert_eq!(response.body["data"][0]["kind"], "water");

    let response = app
        .request("GET", "/api/reminders?kind=workout", None, Some(user))
        .await;
    assert_eq!(response.body["data"].as_array().expect("array").len(), 1);
    assert_eq!(response.body["data"][0]["is_active"], false);
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}
