//! Integration tests for router-wide behavior: health, middleware, errors
//! and the generated API documentation.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};

use super::common::{app, create_author, get, raw, send};

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = send(&app, get("/catalog/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_pings_the_store() {
    let app = app();

    let (status, body) = send(&app, get("/catalog/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = app();

    for uri in ["/nowhere", "/catalog/nowhere"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], 5);
        assert_eq!(body["message"], "Not Found");
    }
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = app();

    let response = raw(&app, get("/catalog/authors")).await;
    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    assert_eq!(headers[header::X_DNS_PREFETCH_CONTROL], "off");
    assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
    assert_eq!(headers[header::X_XSS_PROTECTION], "0");
    assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
}

#[tokio::test]
async fn test_responses_are_gzip_compressed_on_request() {
    let app = app();
    create_author(&app, "Patrick", "Rothfuss").await;

    let request = Request::builder()
        .uri("/catalog/authors")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();
    let response = raw(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/catalog/genre/create")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Fantasy"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], 19);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/catalog/author/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"first_name\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_openapi_document_lists_catalog_paths() {
    let app = app();

    let (status, doc) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["servers"][0]["url"], "/catalog");

    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/ready",
        "/books",
        "/book/genre",
        "/book/{id}",
        "/book/{id}/update",
        "/book/create",
        "/book/{id}/delete",
        "/books/delete",
        "/authors",
        "/author/{id}",
        "/author/{id}/update",
        "/author/create",
        "/author/{id}/delete",
        "/authors/delete",
        "/genres",
        "/genre/{id}",
        "/genre/{id}/update",
        "/genre/create",
        "/genre/{id}/delete",
        "/genres/delete",
        "/bookinstances",
        "/bookinstance/name",
        "/bookinstance/{id}",
        "/bookinstance/{id}/update",
        "/bookinstance/create",
        "/bookinstance/{id}/delete",
        "/bookinstances/delete",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}
