//! Handler tests for Users domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes and the Location header
//! - Problem-details error responses
//!
//! Unlike the app tests, these exercise ONLY the users router,
//! without the gate, correlation id or logging middleware.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use futures::future::join_all;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn seeded_app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::seeded()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_list_users_returns_seeded_users_in_id_order() {
    let response = seeded_app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[0].first_name, "Alice");
    assert_eq!(users[1].id, 2);
    assert_eq!(users[1].email, "bob.johnson@example.com");
}

#[tokio::test]
async fn test_create_user_handler_returns_201_with_location() {
    let request = json_request(
        "POST",
        "/",
        json!({"firstName": "Jan", "lastName": "Doe", "email": "jan@x.com"}),
    );

    let response = seeded_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/users/3");

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["firstName"], "Jan");
    assert_eq!(body["isActive"], true);
    assert!(body["department"].is_null());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_user_handler_validates_input() {
    let request = json_request(
        "POST",
        "/",
        json!({"firstName": "J", "lastName": "   ", "email": "not-an-email"}),
    );

    let response = seeded_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );

    let problem: Value = json_body(response.into_body()).await;
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["title"], "One or more validation errors occurred.");
    assert!(problem["errors"]["firstName"].is_array());
    assert!(problem["errors"]["email"].is_array());
    let last_name: Vec<String> =
        serde_json::from_value(problem["errors"]["lastName"].clone()).unwrap();
    assert!(last_name.contains(&"Last name cannot be empty or whitespace.".to_string()));
}

#[tokio::test]
async fn test_create_user_handler_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"firstName\":"))
        .unwrap();

    let response = seeded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_handler_reports_missing_fields_per_field() {
    let app = seeded_app();

    for body in [
        json!({"lastName": "Doe", "email": "jan@x.com"}),
        json!({"firstName": null, "lastName": "Doe", "email": "jan@x.com"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let problem: Value = json_body(response.into_body()).await;
        assert_eq!(problem["title"], "One or more validation errors occurred.");
        assert_eq!(
            problem["errors"]["firstName"][0],
            "The FirstName field is required."
        );
        assert!(problem["errors"].get("lastName").is_none());
    }
}

#[tokio::test]
async fn test_update_user_handler_reports_missing_email() {
    let request = json_request(
        "PUT",
        "/1",
        json!({"firstName": "Alice", "lastName": "Smith"}),
    );

    let response = seeded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let problem: Value = json_body(response.into_body()).await;
    assert_eq!(problem["errors"]["email"][0], "The Email field is required.");
}

#[tokio::test]
async fn test_create_user_handler_without_content_type_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(
            json!({"firstName": "Jan", "lastName": "Doe", "email": "jan@x.com"}).to_string(),
        ))
        .unwrap();

    let response = seeded_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
}

#[tokio::test]
async fn test_create_user_handler_conflict_any_case() {
    let request = json_request(
        "POST",
        "/",
        json!({"firstName": "Alice", "lastName": "Smith", "email": "ALICE.SMITH@EXAMPLE.COM"}),
    );

    let response = seeded_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let problem: Value = json_body(response.into_body()).await;
    assert_eq!(problem["detail"], "Email already exists.");
}

#[tokio::test]
async fn test_get_user_handler() {
    let app = seeded_app();

    let response = app.clone().oneshot(empty_request("GET", "/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.first_name, "Bob");

    let response = app.clone().oneshot(empty_request("GET", "/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_handler_returns_204_and_persists() {
    let app = seeded_app();

    let request = json_request(
        "PUT",
        "/1",
        json!({
            "firstName": "Alice",
            "lastName": "Smith",
            "email": "alice.smith@example.com",
            "department": "HR",
            "isActive": false
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    let user: UserResponse = json_body(response.into_body()).await;
    assert!(!user.is_active);
}

#[tokio::test]
async fn test_update_user_handler_conflict_and_not_found() {
    let app = seeded_app();

    let taken = json_request(
        "PUT",
        "/1",
        json!({"firstName": "Alice", "lastName": "Smith", "email": "bob.johnson@example.com"}),
    );
    let response = app.clone().oneshot(taken).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let missing = json_request(
        "PUT",
        "/42",
        json!({"firstName": "Nobody", "lastName": "Here", "email": "nobody@x.com"}),
    );
    let response = app.oneshot(missing).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_handler_rejects_whitespace_department() {
    let request = json_request(
        "PUT",
        "/2",
        json!({
            "firstName": "Bob",
            "lastName": "Johnson",
            "email": "bob.johnson@example.com",
            "department": "    "
        }),
    );

    let response = seeded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let problem: Value = json_body(response.into_body()).await;
    assert_eq!(problem["errors"]["department"][0], "Department cannot be whitespace.");
}

#[tokio::test]
async fn test_delete_user_handler_is_not_repeatable() {
    let app = seeded_app();

    let response = app.clone().oneshot(empty_request("DELETE", "/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(empty_request("DELETE", "/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", "/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_keep_increasing_after_delete() {
    let app = seeded_app();

    let response = app.clone().oneshot(empty_request("DELETE", "/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = json_request(
        "POST",
        "/",
        json!({"firstName": "Jan", "lastName": "Doe", "email": "jan@x.com"}),
    );
    let created: UserResponse = json_body(app.oneshot(request).await.unwrap().into_body()).await;
    assert_eq!(created.id, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_yield_distinct_ids() {
    let app = seeded_app();

    let requests = (0..20).map(|i| {
        let app = app.clone();
        async move {
            let request = json_request(
                "POST",
                "/",
                json!({"firstName": "Load", "lastName": "Test", "email": format!("load{i}@x.com")}),
            );
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            json_body::<UserResponse>(response.into_body()).await.id
        }
    });

    let mut ids: Vec<u64> = join_all(requests).await;
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert!(ids.iter().all(|id| *id > 2));
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let response = seeded_app()
        .oneshot(empty_request("PATCH", "/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
