//! Author endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorForm, AuthorFormRejection, BookSummary, DeleteAllResponse, DeleteResponse,
        Submission,
    },
    AppState,
};

use super::{parse_id, FormOrJson};

#[derive(Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub title: String,
    /// Authors ordered by family name
    pub author_list: Vec<Author>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDetailResponse {
    pub title: String,
    pub author: Author,
    /// Books written by the author (title and summary)
    pub author_books: Vec<BookSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorFormResponse {
    pub title: String,
    pub author: Author,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = AuthorListResponse)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<AuthorListResponse>> {
    let author_list = state.services.authors.list().await?;
    Ok(Json(AuthorListResponse {
        title: "Author List".to_string(),
        author_list,
    }))
}

/// Get an author and their books
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author identifier")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorDetailResponse>> {
    let detail = state.services.authors.detail(parse_id(&id)?).await?;
    Ok(Json(AuthorDetailResponse {
        title: "Author Detail".to_string(),
        author: detail.author,
        author_books: detail.author_books,
    }))
}

/// Get the author to prefill an update form
#[utoipa::path(
    get,
    path = "/author/{id}/update",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author identifier")
    ),
    responses(
        (status = 200, description = "Author to update", body = AuthorFormResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorFormResponse>> {
    let author = state.services.authors.get(parse_id(&id)?).await?;
    Ok(Json(AuthorFormResponse {
        title: "Update Author".to_string(),
        author,
    }))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/author/create",
    tag = "authors",
    request_body(
        content = AuthorForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved author id and url; a rejected submission returns AuthorFormRejection", body = crate::models::SavedDocument),
        (status = 415, description = "Unsupported content type", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<AuthorForm>,
) -> AppResult<Json<Submission<AuthorFormRejection>>> {
    let submission = state.services.authors.create(form).await?;
    Ok(Json(submission))
}

/// Replace an author
#[utoipa::path(
    put,
    path = "/author/{id}/update",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    request_body(
        content = AuthorForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved author id and url; a rejected submission returns AuthorFormRejection", body = crate::models::SavedDocument),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(form): FormOrJson<AuthorForm>,
) -> AppResult<Json<Submission<AuthorFormRejection>>> {
    let submission = state.services.authors.update(parse_id(&id)?, form).await?;
    Ok(Json(submission))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let response = state.services.authors.delete(parse_id(&id)?).await?;
    Ok(Json(response))
}

/// Delete every author
#[utoipa::path(
    delete,
    path = "/authors/delete",
    tag = "authors",
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteAllResponse),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_authors(
    State(state): State<AppState>,
) -> AppResult<Json<DeleteAllResponse>> {
    let response = state.services.authors.delete_all().await?;
    Ok(Json(response))
}
