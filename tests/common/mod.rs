#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use quicktutor_backend::app::App;
use quicktutor_backend::config::JwtConfig;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").with_test_writer().try_init();
}

pub fn test_app() -> App {
    init_tracing();
    App::in_memory(JwtConfig::default())
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub async fn signup(app: &Router, email: &str, role: &str) -> StatusCode {
    let body = json!({ "name": "Test User", "email": email, "password": "p4ssword", "role": role });
    send(app, "POST", "/signup", None, Some(body)).await.0
}

pub async fn login(app: &Router, email: &str) -> String {
    let body = json!({ "email": email, "password": "p4ssword" });
    let (status, value) = send(app, "POST", "/login", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {value}");
    value["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    assert_eq!(signup(app, "admin@example.com", "admin").await, StatusCode::CREATED);
    login(app, "admin@example.com").await
}

pub fn course_body(title: &str, tag: &str) -> Value {
    json!({
        "title": title,
        "tag": tag,
        "duration": "20 hrs",
        "price": "₹799",
        "tutor": "Sandeep Sir",
        "desc": "Examples and shortcut methods."
    })
}
