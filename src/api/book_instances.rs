//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        BookInstanceForm, BookInstanceFormRejection, BookTitle, DeleteAllResponse,
        DeleteResponse, PopulatedBookInstance, Submission,
    },
    AppState,
};

use super::{parse_id, FormOrJson};

#[derive(Serialize, ToSchema)]
pub struct BookInstanceListResponse {
    pub title: String,
    pub bookinstance_list: Vec<PopulatedBookInstance>,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceDetailResponse {
    pub title: String,
    pub bookinstance: PopulatedBookInstance,
}

#[derive(Serialize, ToSchema)]
pub struct BookTitlesResponse {
    pub title: String,
    pub book_list: Vec<BookTitle>,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceFormResponse {
    pub title: String,
    pub book_list: Vec<BookTitle>,
    pub selected_book: Uuid,
    pub bookinstance: PopulatedBookInstance,
}

/// List all book copies
#[utoipa::path(
    get,
    path = "/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "List of copies", body = BookInstanceListResponse)
    )
)]
pub async fn list_book_instances(
    State(state): State<AppState>,
) -> AppResult<Json<BookInstanceListResponse>> {
    let bookinstance_list = state.services.book_instances.list().await?;
    Ok(Json(BookInstanceListResponse {
        title: "Book Instance List".to_string(),
        bookinstance_list,
    }))
}

/// Titles of every book, to pick the book of a new copy
#[utoipa::path(
    get,
    path = "/bookinstance/name",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Book titles", body = BookTitlesResponse)
    )
)]
pub async fn book_titles(State(state): State<AppState>) -> AppResult<Json<BookTitlesResponse>> {
    let book_list = state.services.book_instances.book_titles().await?;
    Ok(Json(BookTitlesResponse {
        title: "Create BookInstance".to_string(),
        book_list,
    }))
}

/// Get a copy with its book
#[utoipa::path(
    get,
    path = "/bookinstance/{id}",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance identifier")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetailResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookInstanceDetailResponse>> {
    let bookinstance = state.services.book_instances.detail(parse_id(&id)?).await?;
    Ok(Json(BookInstanceDetailResponse {
        title: "Book:".to_string(),
        bookinstance,
    }))
}

/// Get the copy and the book titles to prefill an update form
#[utoipa::path(
    get,
    path = "/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance identifier")
    ),
    responses(
        (status = 200, description = "Copy to update", body = BookInstanceFormResponse),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_instance_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookInstanceFormResponse>> {
    let context = state
        .services
        .book_instances
        .edit_context(parse_id(&id)?)
        .await?;
    Ok(Json(BookInstanceFormResponse {
        title: "Update BookInstance".to_string(),
        book_list: context.book_list,
        selected_book: context.selected_book,
        bookinstance: context.bookinstance,
    }))
}

/// Create a book copy
#[utoipa::path(
    post,
    path = "/bookinstance/create",
    tag = "bookinstances",
    request_body(
        content = BookInstanceForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved copy id and url; a rejected submission returns BookInstanceFormRejection", body = crate::models::SavedDocument),
        (status = 415, description = "Unsupported content type", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<BookInstanceForm>,
) -> AppResult<Json<Submission<BookInstanceFormRejection>>> {
    let submission = state.services.book_instances.create(form).await?;
    Ok(Json(submission))
}

/// Replace a book copy
#[utoipa::path(
    put,
    path = "/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    request_body(
        content = BookInstanceForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved copy id and url; a rejected submission returns BookInstanceFormRejection", body = crate::models::SavedDocument),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(form): FormOrJson<BookInstanceForm>,
) -> AppResult<Json<Submission<BookInstanceFormRejection>>> {
    let submission = state
        .services
        .book_instances
        .update(parse_id(&id)?, form)
        .await?;
    Ok(Json(submission))
}

/// Delete a book copy
#[utoipa::path(
    delete,
    path = "/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let response = state.services.book_instances.delete(parse_id(&id)?).await?;
    Ok(Json(response))
}

/// Delete every book copy
#[utoipa::path(
    delete,
    path = "/bookinstances/delete",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteAllResponse),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_book_instances(
    State(state): State<AppState>,
) -> AppResult<Json<DeleteAllResponse>> {
    let response = state.services.book_instances.delete_all().await?;
    Ok(Json(response))
}
