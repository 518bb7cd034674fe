//! Integration tests for the genre endpoints.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::common::{
    app, create_author, create_book, create_genre, delete, get, post_form, post_json, put_json,
    send,
};

#[tokio::test]
async fn test_create_and_list_genres() {
    let app = app();
    create_genre(&app, "Science Fiction").await;
    create_genre(&app, "Fantasy").await;

    let (status, list) = send(&app, get("/catalog/genres")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["title"], "Genre List");
    let names: Vec<&str> = list["genre_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fantasy", "Science Fiction"]);
}

#[tokio::test]
async fn test_same_name_returns_existing_genre() {
    let app = app();
    let id = create_genre(&app, "Fantasy").await;

    let (status, body) = send(&app, post_form("/catalog/genre/create", "name=FANTASY")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (_, list) = send(&app, get("/catalog/genres")).await;
    assert_eq!(list["genre_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_genre_name_validation() {
    let app = app();

    let (_, body) = send(&app, post_json("/catalog/genre/create", &json!({ "name": "" }))).await;
    assert_eq!(body["title"], "Create Genre");
    assert_eq!(body["errors"][0]["msg"], "Genre name required");

    let (_, body) = send(&app, post_json("/catalog/genre/create", &json!({ "name": "SF" }))).await;
    assert_eq!(body["genre"]["name"], "SF");
    assert_eq!(
        body["errors"][0]["msg"],
        "Genre name must be between 3 and 100 characters."
    );

    let (_, list) = send(&app, get("/catalog/genres")).await;
    assert!(list["genre_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_genre_detail_lists_books() {
    let app = app();
    let author = create_author(&app, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&app, "Fantasy").await;
    let poetry = create_genre(&app, "Poetry").await;
    create_book(&app, "The Name of the Wind", &author, &[&fantasy]).await;
    create_book(&app, "Leaves of Grass", &author, &[&poetry]).await;

    let (status, body) = send(&app, get(&format!("/catalog/genre/{}", fantasy))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Genre Detail");
    assert_eq!(body["genre"]["name"], "Fantasy");
    let books = body["genre_books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Name of the Wind");
}

#[tokio::test]
async fn test_missing_genre() {
    let app = app();

    let (status, body) = send(&app, get(&format!("/catalog/genre/{}", Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Genre not found");

    let (status, _) = send(&app, get("/catalog/genre/fantasy/update")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_genre() {
    let app = app();
    let id = create_genre(&app, "Fantsy").await;

    let (_, form) = send(&app, get(&format!("/catalog/genre/{}/update", id))).await;
    assert_eq!(form["title"], "Update Genre");
    assert_eq!(form["genre"]["name"], "Fantsy");

    let (status, saved) = send(
        &app,
        put_json(
            &format!("/catalog/genre/{}/update", id),
            &json!({ "name": "Fantasy" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["url"], format!("/catalog/genre/{}", id));

    let (_, detail) = send(&app, get(&format!("/catalog/genre/{}", id))).await;
    assert_eq!(detail["genre"]["name"], "Fantasy");
}

#[tokio::test]
async fn test_rename_onto_another_genre_is_rejected() {
    let app = app();
    create_genre(&app, "Fantasy").await;
    let poetry = create_genre(&app, "Poetry").await;

    let (status, body) = send(
        &app,
        put_json(
            &format!("/catalog/genre/{}/update", poetry),
            &json!({ "name": "FANTASY" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Update Genre");
    assert!(body.get("id").is_none());
    assert_eq!(body["genre"]["name"], "FANTASY");
    assert_eq!(body["errors"][0]["param"], "name");
    assert_eq!(body["errors"][0]["msg"], "Genre name already exists");

    let (_, detail) = send(&app, get(&format!("/catalog/genre/{}", poetry))).await;
    assert_eq!(detail["genre"]["name"], "Poetry");
}

#[tokio::test]
async fn test_delete_genres() {
    let app = app();
    let id = create_genre(&app, "Fantasy").await;
    create_genre(&app, "Poetry").await;

    let (_, body) = send(&app, delete(&format!("/catalog/genre/{}/delete", id))).await;
    assert_eq!(body["message"], "Successfully deleted genre.");
    assert_eq!(body["deleted"], true);

    let (_, body) = send(&app, delete("/catalog/genres/delete")).await;
    assert_eq!(body["message"], "Successfully deleted all genres.");
    assert_eq!(body["deleted_count"], 1);
}
