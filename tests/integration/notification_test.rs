//! Integration tests for the notification inbox endpoints.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{TestApp, daily_water_payload};

async fn send_test_notification(app: &TestApp, user: Uuid, reminder_id: &str) {
    let response = app
        .request(
            "POST",
            &format!("/api/reminders/{reminder_id}/test-send"),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Test notification sent");
}

#[tokio::test]
async fn test_test_send_populates_owner_inbox() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let created = app.create_reminder(owner, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();
    send_test_notification(&app, owner, &id).await;

    let response = app
        .request("GET", "/api/notifications", None, Some(owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Reminder");
    assert_eq!(items[0]["body"], "Drink water");
    assert_eq!(items[0]["is_read"], false);

    // Another user's inbox stays empty.
    let response = app
        .request("GET", "/api/notifications", None, Some(stranger))
        .await;
    assert!(response.body["data"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_unread_count_and_mark_read() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let created = app.create_reminder(user, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();
    send_test_notification(&app, user, &id).await;
    send_test_notification(&app, user, &id).await;

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(user))
        .await;
    assert_eq!(response.body["data"]["count"], 2);

    let listed = app
        .request("GET", "/api/notifications", None, Some(user))
        .await;
    let notification_id = listed.body["data"][0]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{notification_id}/read"),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Marked as read");

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(user))
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    // A foreign user cannot mark someone else's notification.
    let stranger = Uuid::new_v4();
    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{notification_id}/read"),
            None,
            Some(stranger),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_all_read_reports_count() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let created = app.create_reminder(user, daily_water_payload()).await;
    let id = created["id"].as_str().expect("id").to_string();
    send_test_notification(&app, user, &id).await;
    send_test_notification(&app, user, &id).await;

    let response = app
        .request("PUT", "/api/notifications/read-all", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["marked"], 2);

    let response = app
        .request("PUT", "/api/notifications/read-all", None, Some(user))
        .await;
    assert_eq!(response.body["data"]["marked"], 0);
}
