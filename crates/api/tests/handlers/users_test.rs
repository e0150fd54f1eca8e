use axum::http::{StatusCode, header::COOKIE};
use coachbook_core::models::user::{SelectUserResponse, User, UserRole};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{ALICE, COACH, TestContext, selected};

#[tokio::test]
async fn test_list_users_and_coaches() {
    let ctx = TestContext::new();

    let users: Vec<User> = ctx.server.get("/api/users").await.json();
    assert_eq!(users.len(), 4);

    let coaches: Vec<User> = ctx.server.get("/api/coaches").await.json();
    assert_eq!(coaches.len(), 2);
    assert!(coaches.iter().all(|user| user.role == UserRole::Coach));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let ctx = TestContext::new();

    let found = ctx.server.get(&format!("/api/users/{}", ALICE)).await;
    found.assert_status_ok();
    let user: User = found.json();
    assert_eq!(user.email, "alice@example.com");

    ctx.server
        .get("/api/users/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_select_user_sets_cookie() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/session")
        .json(&json!({ "user_id": COACH }))
        .await;

    response.assert_status_ok();
    let cookie = response.header("set-cookie");
    assert_eq!(
        cookie.to_str().unwrap(),
        "selectedUserId=1; Path=/; Max-Age=2592000; SameSite=Lax"
    );
    let body: SelectUserResponse = response.json();
    assert_eq!(body.user.id, COACH);
}

#[tokio::test]
async fn test_selecting_unknown_user_fails() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/session")
        .json(&json!({ "user_id": 42 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_current_user_reads_cookie() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/session")
        .add_header(COOKIE, selected(ALICE))
        .await;
    response.assert_status_ok();
    let body: SelectUserResponse = response.json();
    assert_eq!(body.user.role, UserRole::Student);

    ctx.server
        .get("/api/session")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/session")
        .add_header(COOKIE, selected(77))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    ctx.server.get("/health").await.assert_json(&json!({ "status": "ok" }));

    let version: serde_json::Value = ctx.server.get("/version").await.json();
    assert_eq!(version["name"], json!("coachbook-api"));
}
