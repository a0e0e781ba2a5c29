mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{send, signup, login, test_app};
use quicktutor_backend::config::JwtConfig;
use quicktutor_backend::model::user::Role;
use quicktutor_backend::util::jwt::JwtTokenUtilsImpl;
use serde_json::json;

#[tokio::test]
async fn test_signup_login_me_scenario() {
    let app = test_app().router();

    let body = json!({ "name": "A", "email": "a@x.com", "password": "p" });
    let (status, value) = send(&app, "POST", "/signup", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["message"], "Signup successful");
    assert!(value.get("token").is_none());

    let (status, value) = send(&app, "POST", "/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(value["error"], "Conflict");

    let (status, value) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com", "password": "p" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Login successful");
    assert_eq!(value["user"]["role"], "user");
    assert_eq!(value["user"]["email"], "a@x.com");
    let token = value["token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, "GET", "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@x.com");
    assert_eq!(me["name"], "A");
    assert!(me.get("password").is_none());
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = test_app().router();
    let body = json!({ "name": "A", "username": "alice", "password": "p" });
    let (status, _) = send(&app, "POST", "/signup", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_without_email_or_username_is_rejected() {
    let app = test_app().router();
    let (status, value) = send(&app, "POST", "/signup", None, Some(json!({ "name": "A", "password": "p" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "BadRequest");
}

#[tokio::test]
async fn test_signup_with_bad_email_fails_validation() {
    let app = test_app().router();
    let body = json!({ "name": "A", "email": "not-an-email", "password": "p" });
    let (status, value) = send(&app, "POST", "/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Validation");
}

#[tokio::test]
async fn test_signup_with_padded_email_succeeds() {
    let app = test_app().router();
    assert_eq!(signup(&app, "  Padded@Example.com ", "user").await, StatusCode::CREATED);
    let body = json!({ "email": "padded@example.com", "password": "p4ssword" });
    let (status, value) = send(&app, "POST", "/login", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["user"]["email"], "padded@example.com");
}

#[tokio::test]
async fn test_login_with_wrong_case_email_succeeds() {
    let app = test_app().router();
    assert_eq!(signup(&app, "ritu@example.com", "user").await, StatusCode::CREATED);
    let body = json!({ "email": "RITU@Example.COM", "password": "p4ssword" });
    let (status, _) = send(&app, "POST", "/login", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures() {
    let app = test_app().router();
    assert_eq!(signup(&app, "a@x.com", "user").await, StatusCode::CREATED);

    let (status, value) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com", "password": "wrong" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(value["message"], "Invalid credentials");

    let (status, _) = send(&app, "POST", "/login", None, Some(json!({ "email": "nobody@x.com", "password": "p" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/login", None, Some(json!({ "password": "p" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = test_app().router();

    let (status, value) = send(&app, "GET", "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(value["message"], "No token");

    let (status, value) = send(&app, "GET", "/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(value["message"], "Invalid token");
}

#[tokio::test]
async fn test_token_older_than_seven_days_is_rejected() {
    let app = test_app().router();
    assert_eq!(signup(&app, "a@x.com", "user").await, StatusCode::CREATED);
    let token = login(&app, "a@x.com").await;
    let (_, me) = send(&app, "GET", "/me", Some(&token), None).await;
    let user_id = me["_id"].as_str().unwrap().to_string();

    let jwt = JwtTokenUtilsImpl::new(JwtConfig::default());
    let stale = jwt
        .generate_token_at(&user_id, Role::User, "Test User", Some("a@x.com"), Utc::now() - Duration::days(8))
        .unwrap();
    let (status, _) = send(&app, "GET", "/me", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_aliases_share_handlers() {
    let app = test_app().router();
    let body = json!({ "name": "B", "username": "bob", "password": "p" });
    let (status, _) = send(&app, "POST", "/api/auth/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, value) = send(&app, "POST", "/api/auth/login", None, Some(json!({ "username": "bob", "password": "p" }))).await;
    assert_eq!(status, StatusCode::OK);
    let token = value["token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "bob");

    let (status, value) = send(&app, "POST", "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn test_health() {
    let app = test_app().router();
    let (status, value) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, "OK");
}
