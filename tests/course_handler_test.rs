mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::{admin_token, course_body, login, send, signup, test_app};
use serde_json::json;

#[tokio::test]
async fn test_list_is_public_and_starts_empty() {
    let app = test_app().router();
    let (status, value) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_non_admin_create_is_forbidden() {
    let app = test_app();
    let router = app.router();
    assert_eq!(signup(&router, "student@example.com", "user").await, StatusCode::CREATED);
    let token = login(&router, "student@example.com").await;

    let (status, value) = send(&router, "POST", "/courses", Some(&token), Some(course_body("X", "jee"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "Admin only");
    assert_eq!(app.course_service.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let app = test_app();
    let router = app.router();
    let (status, value) = send(&router, "POST", "/api/courses", None, Some(course_body("X", "jee"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(value["message"], "No token");
    assert_eq!(app.course_service.count_courses().await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_create_returns_record() {
    let app = test_app().router();
    let token = admin_token(&app).await;

    let (status, course) = send(&app, "POST", "/courses", Some(&token), Some(course_body("Coordinate Geometry", "class12"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["title"], "Coordinate Geometry");
    assert_eq!(course["tag"], "class12");
    assert_eq!(course["_id"].as_str().unwrap().len(), 24);
    assert!(course["createdAt"].is_string());
}

#[tokio::test]
async fn test_missing_fields_default_to_empty_strings() {
    let app = test_app().router();
    let token = admin_token(&app).await;
    let (status, course) = send(&app, "POST", "/courses", Some(&token), Some(json!({ "tag": "jee" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["title"], "");
    assert_eq!(course["desc"], "");
    assert_eq!(course["tag"], "jee");
}

#[tokio::test]
async fn test_courses_list_newest_first() {
    let app = test_app().router();
    let token = admin_token(&app).await;
    for title in ["First", "Second", "Third"] {
        let (status, _) = send(&app, "POST", "/courses", Some(&token), Some(course_body(title, "jee"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, list) = send(&app, "GET", "/courses", None, None).await;
    let titles: Vec<&str> = list.as_array().unwrap().iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_course_aliases_share_handlers() {
    let app = test_app().router();
    let token = admin_token(&app).await;
    let (status, _) = send(&app, "POST", "/api/courses", Some(&token), Some(course_body("Via alias", "neet"))).await;
    assert_eq!(status, StatusCode::CREATED);

    for path in ["/courses", "/api/courses", "/api/allCourses"] {
        let (status, list) = send(&app, "GET", path, None, None).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(list.as_array().unwrap().len(), 1, "{path}");
        assert_eq!(list[0]["title"], "Via alias");
    }
}

#[tokio::test]
async fn test_update_sets_only_supplied_fields() {
    let app = test_app().router();
    let token = admin_token(&app).await;
    let (_, created) = send(&app, "POST", "/courses", Some(&token), Some(course_body("Electrostatics", "jee"))).await;
    let id = created["_id"].as_str().unwrap();

    let uri = format!("/api/courses/{}", id);
    let (status, updated) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "price": "₹999" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "₹999");
    assert_eq!(updated["title"], "Electrostatics");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let app = test_app().router();
    let token = admin_token(&app).await;

    let uri = format!("/courses/{}", ObjectId::new().to_hex());
    let (status, value) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "title": "T" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "NotFound");

    let (status, _) = send(&app, "PUT", "/courses/not-an-id", Some(&token), Some(json!({ "title": "T" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = test_app();
    let router = app.router();
    let token = admin_token(&router).await;
    let (_, created) = send(&router, "POST", "/courses", Some(&token), Some(course_body("Gone soon", "neet"))).await;
    let uri = format!("/courses/{}", created["_id"].as_str().unwrap());

    let (status, value) = send(&router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Deleted");
    assert_eq!(app.course_service.count_courses().await.unwrap(), 0);

    let (status, value) = send(&router, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["message"], "Deleted");
}

#[tokio::test]
async fn test_non_admin_cannot_delete() {
    let app = test_app().router();
    assert_eq!(signup(&app, "student@example.com", "user").await, StatusCode::CREATED);
    let token = login(&app, "student@example.com").await;
    let uri = format!("/courses/{}", ObjectId::new().to_hex());
    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_publishes_course_added() {
    let app = test_app();
    let router = app.router();
    let mut rx = app.events.subscribe();
    let token = admin_token(&router).await;

    let (_, created) = send(&router, "POST", "/courses", Some(&token), Some(course_body("Pushed", "jee"))).await;
    let pushed = rx.recv().await.unwrap();
    assert_eq!(pushed.id, created["_id"].as_str().unwrap());
    assert_eq!(pushed.title, "Pushed");
}
