//! Router tests against the in-memory stores.

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::middleware::REQUEST_ID_HEADER;
use crate::api::routes::{OPENAPI_JSON_PATH, create_router};
use crate::repositories::memory::MemoryStore;
use crate::state::AppState;

const EMAIL: &str = "joe@smith.com";
const PASSWORD: &str = "joepassword";

fn app() -> Router {
    let state = AppState::from_repositories(MemoryStore::repositories());
    create_router(state, Duration::from_secs(30))
}

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<String>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn user_body(email: &str) -> Value {
    json!({
        "firstName": "Joe",
        "lastName": "Smith",
        "emailAddress": email,
        "password": PASSWORD,
    })
}

async fn register(app: &Router, email: &str) {
    let response = send(app, Method::POST, "/api/users", None, Some(user_body(email))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn create_course(app: &Router, body: Value) -> Response {
    send(
        app,
        Method::POST,
        "/api/courses",
        Some(basic(EMAIL, PASSWORD)),
        Some(body),
    )
    .await
}

fn course_body() -> Value {
    json!({
        "title": "Build a Basic Bookcase",
        "description": "High-end furniture projects are great to dream about.",
        "estimatedTime": "12 hours",
    })
}

#[tokio::test]
async fn test_register_and_fetch_current_user() {
    let app = app();

    let response = send(&app, Method::POST, "/api/users", None, Some(user_body(EMAIL))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let response = send(&app, Method::GET, "/api/users", Some(basic(EMAIL, PASSWORD)), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["emailAddress"], EMAIL);
    assert_eq!(json["firstName"], "Joe");
    assert!(json.get("password").is_none());
    assert!(!json.to_string().contains(PASSWORD));
    assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = app();
    register(&app, EMAIL).await;

    let response = send(&app, Method::POST, "/api/users", None, Some(user_body(EMAIL))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"][0], "The email you entered already exists.");
}

#[tokio::test]
async fn test_register_reports_every_missing_field() {
    let app = app();

    let response = send(&app, Method::POST, "/api/users", None, Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = app();
    register(&app, EMAIL).await;

    let response = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(body_json(response).await["message"], "Access denied");

    let response = send(
        &app,
        Method::GET,
        "/api/users",
        Some(basic(EMAIL, "wrongpassword")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        Method::GET,
        "/api/users",
        Some(basic("nobody@example.com", PASSWORD)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::POST, "/api/courses", None, Some(course_body())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, Method::DELETE, "/api/courses/1", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_read_course() {
    let app = app();
    register(&app, EMAIL).await;

    let response = create_course(&app, course_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/courses/1"
    );

    let response = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let courses = json.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Build a Basic Bookcase");
    assert_eq!(courses[0]["userId"], 1);
    assert_eq!(courses[0]["user"]["emailAddress"], EMAIL);
    assert!(courses[0]["user"].get("password").is_none());

    let response = send(&app, Method::GET, "/api/courses/1", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["estimatedTime"], "12 hours");
    assert!(json["materialsNeeded"].is_null());
}

#[tokio::test]
async fn test_create_course_validation() {
    let app = app();
    register(&app, EMAIL).await;

    let response = create_course(&app, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        json!(["A description is required!", "A title is required!"])
    );
}

#[tokio::test]
async fn test_create_course_with_unknown_owner_fails() {
    let app = app();
    register(&app, EMAIL).await;

    let mut body = course_body();
    body["userId"] = json!(99);
    let response = create_course(&app, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_course_is_not_found() {
    let app = app();

    let response = send(&app, Method::GET, "/api/courses/999", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_course() {
    let app = app();
    register(&app, EMAIL).await;
    create_course(&app, course_body()).await;
    let auth = Some(basic(EMAIL, PASSWORD));

    let response = send(&app, Method::PUT, "/api/courses/1", auth.clone(), Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"][0],
        "No updated content found."
    );

    let response = send(
        &app,
        Method::PUT,
        "/api/courses/1",
        auth.clone(),
        Some(json!({"title": "Build a Better Bookcase"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(send(&app, Method::GET, "/api/courses/1", None, None).await).await;
    assert_eq!(json["title"], "Build a Better Bookcase");
    assert_eq!(json["estimatedTime"], "12 hours");

    let response = send(
        &app,
        Method::PUT,
        "/api/courses/42",
        auth,
        Some(json!({"title": "Nope"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_course_clears_nullable_field() {
    let app = app();
    register(&app, EMAIL).await;
    create_course(&app, course_body()).await;

    let response = send(
        &app,
        Method::PUT,
        "/api/courses/1",
        Some(basic(EMAIL, PASSWORD)),
        Some(json!({"estimatedTime": null})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(send(&app, Method::GET, "/api/courses/1", None, None).await).await;
    assert!(json["estimatedTime"].is_null());
    assert_eq!(json["title"], "Build a Basic Bookcase");
}

#[tokio::test]
async fn test_update_course_with_unknown_owner() {
    let app = app();
    register(&app, EMAIL).await;
    create_course(&app, course_body()).await;
    let auth = Some(basic(EMAIL, PASSWORD));

    let response = send(
        &app,
        Method::PUT,
        "/api/courses/1",
        auth.clone(),
        Some(json!({"userId": 99})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(send(&app, Method::GET, "/api/courses/1", None, None).await).await;
    assert_eq!(json["userId"], 1);

    let response = send(
        &app,
        Method::PUT,
        "/api/courses/999",
        auth,
        Some(json!({"userId": 99})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_course_id_is_json_bad_request() {
    let app = app();
    register(&app, EMAIL).await;

    let response = send(&app, Method::GET, "/api/courses/abc", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = send(
        &app,
        Method::DELETE,
        "/api/courses/abc",
        Some(basic(EMAIL, PASSWORD)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_course_twice() {
    let app = app();
    register(&app, EMAIL).await;
    create_course(&app, course_body()).await;
    let auth = Some(basic(EMAIL, PASSWORD));

    let response = send(&app, Method::DELETE, "/api/courses/1", auth.clone(), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::DELETE, "/api/courses/1", auth, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::GET, "/api/courses/1", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let response = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "healthy");

    let response = send(&app, Method::GET, "/health/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app();

    let response = send(&app, Method::GET, "/api/courses", None, None).await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let request = Request::builder()
        .uri("/api/courses/999")
        .header(REQUEST_ID_HEADER, "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-me");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let response = send(&app, Method::GET, OPENAPI_JSON_PATH, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["paths"].get("/api/courses/{id}").is_some());
    assert!(json["components"]["securitySchemes"].get("basicAuth").is_some());
}
