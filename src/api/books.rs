//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        Author, BookForm, BookFormRejection, BookInstance, BookWithAuthor, DeleteAllResponse,
        DeleteResponse, Genre, GenreChoice, PopulatedBook, Submission,
    },
    AppState,
};

use super::{parse_id, FormOrJson};

#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub title: String,
    /// Books ordered by title, author populated
    pub book_list: Vec<BookWithAuthor>,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub title: String,
    pub book: PopulatedBook,
    pub book_instances: Vec<BookInstance>,
}

#[derive(Serialize, ToSchema)]
pub struct BookGenreResponse {
    pub title: String,
    pub book_list: Vec<BookWithAuthor>,
    pub genre_list: Vec<Genre>,
}

#[derive(Serialize, ToSchema)]
pub struct BookFormResponse {
    pub title: String,
    pub book: PopulatedBook,
    pub authors: Vec<Author>,
    /// Every genre, checked when the book belongs to it
    pub genres: Vec<GenreChoice>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookListResponse>> {
    let book_list = state.services.books.list().await?;
    Ok(Json(BookListResponse {
        title: "Book List".to_string(),
        book_list,
    }))
}

/// List books and genres together
#[utoipa::path(
    get,
    path = "/book/genre",
    tag = "books",
    responses(
        (status = 200, description = "Books and genres", body = BookGenreResponse)
    )
)]
pub async fn list_books_and_genres(
    State(state): State<AppState>,
) -> AppResult<Json<BookGenreResponse>> {
    let (book_list, genre_list) = state.services.books.with_genres().await?;
    Ok(Json(BookGenreResponse {
        title: "Create Book".to_string(),
        book_list,
        genre_list,
    }))
}

/// Get a book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book identifier")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let detail = state.services.books.detail(parse_id(&id)?).await?;
    Ok(Json(BookDetailResponse {
        title: detail.book.title.clone(),
        book: detail.book,
        book_instances: detail.book_instances,
    }))
}

/// Get the book with every author and genre to prefill an update form
#[utoipa::path(
    get,
    path = "/book/{id}/update",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book identifier")
    ),
    responses(
        (status = 200, description = "Book to update", body = BookFormResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookFormResponse>> {
    let context = state.services.books.edit_context(parse_id(&id)?).await?;
    Ok(Json(BookFormResponse {
        title: "Update Book".to_string(),
        book: context.book,
        authors: context.authors,
        genres: context.genres,
    }))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "books",
    request_body(
        content = BookForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json; genre may repeat"
    ),
    responses(
        (status = 200, description = "Saved book id and url; a rejected submission returns BookFormRejection", body = crate::models::SavedDocument),
        (status = 415, description = "Unsupported content type", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<BookForm>,
) -> AppResult<Json<Submission<BookFormRejection>>> {
    let submission = state.services.books.create(form).await?;
    Ok(Json(submission))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/book/{id}/update",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    request_body(
        content = BookForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json; genre may repeat"
    ),
    responses(
        (status = 200, description = "Saved book id and url; a rejected submission returns BookFormRejection", body = crate::models::SavedDocument),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(form): FormOrJson<BookForm>,
) -> AppResult<Json<Submission<BookFormRejection>>> {
    let submission = state.services.books.update(parse_id(&id)?, form).await?;
    Ok(Json(submission))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}/delete",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let response = state.services.books.delete(parse_id(&id)?).await?;
    Ok(Json(response))
}

/// Delete every book
#[utoipa::path(
    delete,
    path = "/books/delete",
    tag = "books",
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteAllResponse),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_books(State(state): State<AppState>) -> AppResult<Json<DeleteAllResponse>> {
    let response = state.services.books.delete_all().await?;
    Ok(Json(response))
}
