//! Integration tests for the book instance endpoints.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::common::{
    app, create, create_author, create_book, delete, get, post_form, post_json, put_json, send,
};

async fn seed_book(app: &axum::Router) -> String {
    let author = create_author(app, "Patrick", "Rothfuss").await;
    create_book(app, "The Name of the Wind", &author, &[]).await
}

#[tokio::test]
async fn test_detail_embeds_the_full_book() {
    let app = app();
    let book = seed_book(&app).await;

    let id = create(
        &app,
        "/catalog/bookinstance/create",
        json!({
            "book": book,
            "imprint": "Gollancz, 2007.",
            "status": "Loaned",
            "due_back": "2024-03-01"
        }),
    )
    .await;

    let (status, body) = send(&app, get(&format!("/catalog/bookinstance/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Book:");

    let instance = &body["bookinstance"];
    assert_eq!(instance["status"], "Loaned");
    assert_eq!(instance["due_back"], "2024-03-01");
    assert_eq!(instance["imprint"], "Gollancz, 2007.");
    assert_eq!(instance["book"]["id"], book.as_str());
    assert_eq!(instance["book"]["title"], "The Name of the Wind");
    assert_eq!(instance["book"]["isbn"], "9780756404079");
    assert_eq!(instance["book"]["summary"], "Summary of The Name of the Wind");
}

#[tokio::test]
async fn test_unknown_status_is_rejected_before_persistence() {
    let app = app();
    let book = seed_book(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/catalog/bookinstance/create",
            &json!({ "book": book, "imprint": "Gollancz", "status": "Lost" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Create BookInstance");
    assert_eq!(body["selected_book"], book.as_str());
    assert_eq!(body["book_list"].as_array().unwrap().len(), 1);
    assert_eq!(body["bookinstance"]["status"], "Lost");
    assert_eq!(body["errors"][0]["param"], "status");
    assert_eq!(body["errors"][0]["msg"], "Invalid status");

    let (_, list) = send(&app, get("/catalog/bookinstances")).await;
    assert!(list["bookinstance_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_status_and_date_take_defaults() {
    let app = app();
    let book = seed_book(&app).await;

    let form = format!("book={}&imprint=Gollancz&status=&due_back=", book);
    let (status, saved) = send(&app, post_form("/catalog/bookinstance/create", &form)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(saved["url"].as_str().unwrap())).await;
    assert_eq!(body["bookinstance"]["status"], "Maintenance");
    assert_eq!(
        body["bookinstance"]["due_back"],
        Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn test_missing_book_and_imprint() {
    let app = app();

    let (_, body) = send(
        &app,
        post_json("/catalog/bookinstance/create", &json!({ "status": "Available" })),
    )
    .await;
    let messages: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["Book must be specified", "Imprint must be specified"]);
}

#[tokio::test]
async fn test_list_and_book_titles() {
    let app = app();
    let book = seed_book(&app).await;
    for imprint in ["Gollancz", "DAW"] {
        create(
            &app,
            "/catalog/bookinstance/create",
            json!({ "book": book, "imprint": imprint, "status": "Available" }),
        )
        .await;
    }

    let (status, list) = send(&app, get("/catalog/bookinstances")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["title"], "Book Instance List");
    let instances = list["bookinstance_list"].as_array().unwrap();
    assert_eq!(instances.len(), 2);
    assert!(instances
        .iter()
        .all(|i| i["book"]["title"] == "The Name of the Wind"));

    let (status, names) = send(&app, get("/catalog/bookinstance/name")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names["title"], "Create BookInstance");
    assert_eq!(names["book_list"][0]["title"], "The Name of the Wind");
}

#[tokio::test]
async fn test_update_form_and_replace() {
    let app = app();
    let book = seed_book(&app).await;
    let id = create(
        &app,
        "/catalog/bookinstance/create",
        json!({ "book": book, "imprint": "Gollancz", "status": "Available" }),
    )
    .await;

    let (status, form) = send(&app, get(&format!("/catalog/bookinstance/{}/update", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["selected_book"], book.as_str());
    assert_eq!(form["bookinstance"]["book"]["title"], "The Name of the Wind");

    let (status, _) = send(
        &app,
        put_json(
            &format!("/catalog/bookinstance/{}/update", id),
            &json!({
                "book": book,
                "imprint": "Gollancz",
                "status": "Reserved",
                "due_back": "2030-01-15T09:00:00Z"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/catalog/bookinstance/{}", id))).await;
    assert_eq!(body["bookinstance"]["status"], "Reserved");
    assert_eq!(body["bookinstance"]["due_back"], "2030-01-15");
}

#[tokio::test]
async fn test_missing_copy() {
    let app = app();

    let (status, body) =
        send(&app, get(&format!("/catalog/bookinstance/{}", Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book copy not found");
}

#[tokio::test]
async fn test_delete_copies() {
    let app = app();
    let book = seed_book(&app).await;
    let id = create(
        &app,
        "/catalog/bookinstance/create",
        json!({ "book": book, "imprint": "Gollancz" }),
    )
    .await;

    let (_, body) = send(&app, delete(&format!("/catalog/bookinstance/{}/delete", id))).await;
    assert_eq!(body["message"], "Successfully deleted book instance.");
    assert_eq!(body["deleted"], true);

    let (_, body) = send(&app, delete("/catalog/bookinstances/delete")).await;
    assert_eq!(body["message"], "Successfully deleted all book instances.");
    assert_eq!(body["deleted_count"], 0);
}
