//! Shared helpers for driving the router in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use local_library::{config::AppConfig, create_router, repository::Repository, AppState};

/// Router over a fresh, empty in-memory store
pub fn app() -> Router {
    create_router(AppState::new(AppConfig::in_memory(), Repository::in_memory()))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    json_request("POST", uri, body)
}

pub fn put_json(uri: &str, body: &Value) -> Request<Body> {
    json_request("PUT", uri, body)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Url-encoded form post; `body` must already be encoded
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn raw(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Sends the request and decodes the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = raw(app, request).await;
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

/// Creates a document and returns its id, panicking on a rejection
pub async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, value) = send(app, post_json(uri, &body)).await;
    assert_eq!(status, StatusCode::OK);
    value["id"]
        .as_str()
        .unwrap_or_else(|| panic!("{} rejected: {}", uri, value))
        .to_string()
}

pub async fn create_author(app: &Router, first_name: &str, family_name: &str) -> String {
    create(
        app,
        "/catalog/author/create",
        serde_json::json!({ "first_name": first_name, "family_name": family_name }),
    )
    .await
}

pub async fn create_genre(app: &Router, name: &str) -> String {
    create(app, "/catalog/genre/create", serde_json::json!({ "name": name })).await
}

pub async fn create_book(app: &Router, title: &str, author: &str, genres: &[&str]) -> String {
    create(
        app,
        "/catalog/book/create",
        serde_json::json!({
            "title": title,
            "author": author,
            "summary": format!("Summary of {}", title),
            "isbn": "9780756404079",
            "genre": genres,
        }),
    )
    .await
}
