//! Integration tests for the author endpoints.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::common::{
    app, create_author, create_book, delete, get, post_form, post_json, put_json, send,
};

#[tokio::test]
async fn test_create_author_resolves_to_its_url() {
    let app = app();

    let (status, body) = send(
        &app,
        post_form(
            "/catalog/author/create",
            "first_name=Patrick&family_name=Rothfuss&date_of_birth=1973-06-06&date_of_death=",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap();
    let url = body["url"].as_str().unwrap();
    assert_eq!(url, format!("/catalog/author/{}", id));

    let (status, list) = send(&app, get("/catalog/authors")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["title"], "Author List");
    let authors = list["author_list"].as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["name"], "Rothfuss, Patrick");
    assert_eq!(authors[0]["date_of_birth"], "1973-06-06");
    assert!(authors[0]["date_of_death"].is_null());
}

#[tokio::test]
async fn test_empty_first_name_is_echoed_without_write() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/catalog/author/create",
            &json!({ "first_name": "  ", "family_name": "Rothfuss" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Create Author");
    assert_eq!(body["author"]["family_name"], "Rothfuss");
    assert!(body.get("id").is_none());

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["param"], "first_name");
    assert_eq!(errors[0]["msg"], "First name must be specified.");

    let (_, list) = send(&app, get("/catalog/authors")).await;
    assert!(list["author_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_names_longer_than_one_hundred_characters_are_rejected() {
    let app = app();
    let longest = "a".repeat(100);

    let (status, saved) = send(
        &app,
        post_json(
            "/catalog/author/create",
            &json!({ "first_name": longest, "family_name": longest }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(saved["id"].is_string());

    let (status, body) = send(
        &app,
        post_json(
            "/catalog/author/create",
            &json!({ "first_name": "a".repeat(101), "family_name": "Rothfuss" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Create Author");
    assert!(body.get("id").is_none());
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["param"], "first_name");
    assert_eq!(errors[0]["msg"], "First name must be at most 100 characters.");

    let (_, list) = send(&app, get("/catalog/authors")).await;
    assert_eq!(list["author_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_alphanumeric_name_and_bad_date() {
    let app = app();

    let (_, body) = send(
        &app,
        post_json(
            "/catalog/author/create",
            &json!({
                "first_name": "Jean-Luc",
                "family_name": "Picard",
                "date_of_birth": "not a date"
            }),
        ),
    )
    .await;

    let messages: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "First name has non-alphanumeric characters.",
            "Invalid date of birth"
        ]
    );
}

#[tokio::test]
async fn test_missing_author_is_not_found() {
    let app = app();

    let (status, body) = send(&app, get(&format!("/catalog/author/{}", Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);
    assert_eq!(body["error"], "NoSuchData");
    assert_eq!(body["message"], "Author not found");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, get("/catalog/author/12345")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID supplied");
}

#[tokio::test]
async fn test_author_detail_lists_their_books() {
    let app = app();
    let author = create_author(&app, "Patrick", "Rothfuss").await;
    let other = create_author(&app, "Jim", "Butcher").await;
    create_book(&app, "The Name of the Wind", &author, &[]).await;
    create_book(&app, "Death Masks", &other, &[]).await;

    let (status, body) = send(&app, get(&format!("/catalog/author/{}", author))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Author Detail");
    assert_eq!(body["author"]["family_name"], "Rothfuss");

    let books = body["author_books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Name of the Wind");
    assert_eq!(books[0]["summary"], "Summary of The Name of the Wind");
}

#[tokio::test]
async fn test_update_replaces_author() {
    let app = app();
    let id = create_author(&app, "Patrick", "Rothfuss").await;

    let (status, form) = send(&app, get(&format!("/catalog/author/{}/update", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["title"], "Update Author");
    assert_eq!(form["author"]["first_name"], "Patrick");

    let (status, saved) = send(
        &app,
        put_json(
            &format!("/catalog/author/{}/update", id),
            &json!({ "first_name": "Pat", "family_name": "Rothfuss" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["id"], id.as_str());

    let (_, detail) = send(&app, get(&format!("/catalog/author/{}", id))).await;
    assert_eq!(detail["author"]["name"], "Rothfuss, Pat");
}

#[tokio::test]
async fn test_update_rejection_uses_update_title() {
    let app = app();
    let id = create_author(&app, "Patrick", "Rothfuss").await;

    let (_, body) = send(
        &app,
        put_json(
            &format!("/catalog/author/{}/update", id),
            &json!({ "first_name": "Patrick", "family_name": "" }),
        ),
    )
    .await;
    assert_eq!(body["title"], "Update Author");
    assert_eq!(body["errors"][0]["msg"], "Family name must be specified.");
}

#[tokio::test]
async fn test_delete_one_always_confirms() {
    let app = app();
    let id = create_author(&app, "Ben", "Bova").await;
    let uri = format!("/catalog/author/{}/delete", id);

    let (status, first) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Successfully deleted author.");
    assert_eq!(first["deleted"], true);

    let (status, second) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Successfully deleted author.");
    assert_eq!(second["deleted"], false);
}

#[tokio::test]
async fn test_delete_all_empties_the_list() {
    let app = app();
    create_author(&app, "Patrick", "Rothfuss").await;
    create_author(&app, "Isaac", "Asimov").await;

    let (status, body) = send(&app, delete("/catalog/authors/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully deleted all authors.");
    assert_eq!(body["deleted_count"], 2);

    let (_, list) = send(&app, get("/catalog/authors")).await;
    assert!(list["author_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_authors_are_ordered_by_family_name() {
    let app = app();
    create_author(&app, "Patrick", "Rothfuss").await;
    create_author(&app, "Isaac", "Asimov").await;
    create_author(&app, "Jim", "Butcher").await;

    let (_, list) = send(&app, get("/catalog/authors")).await;
    let names: Vec<&str> = list["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["family_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asimov", "Butcher", "Rothfuss"]);
}
