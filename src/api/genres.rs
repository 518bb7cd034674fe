//! Genre endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        BookSummary, DeleteAllResponse, DeleteResponse, Genre, GenreForm, GenreFormRejection,
        Submission,
    },
    AppState,
};

use super::{parse_id, FormOrJson};

#[derive(Serialize, ToSchema)]
pub struct GenreListResponse {
    pub title: String,
    pub genre_list: Vec<Genre>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreDetailResponse {
    pub title: String,
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreFormResponse {
    pub title: String,
    pub genre: Genre,
}

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "List of genres", body = GenreListResponse)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<GenreListResponse>> {
    let genre_list = state.services.genres.list().await?;
    Ok(Json(GenreListResponse {
        title: "Genre List".to_string(),
        genre_list,
    }))
}

/// Get a genre and the books filed under it
#[utoipa::path(
    get,
    path = "/genre/{id}",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre identifier")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreDetailResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GenreDetailResponse>> {
    let detail = state.services.genres.detail(parse_id(&id)?).await?;
    Ok(Json(GenreDetailResponse {
        title: "Genre Detail".to_string(),
        genre: detail.genre,
        genre_books: detail.genre_books,
    }))
}

/// Get the genre to prefill an update form
#[utoipa::path(
    get,
    path = "/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre identifier")
    ),
    responses(
        (status = 200, description = "Genre to update", body = GenreFormResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GenreFormResponse>> {
    let genre = state.services.genres.get(parse_id(&id)?).await?;
    Ok(Json(GenreFormResponse {
        title: "Update Genre".to_string(),
        genre,
    }))
}

/// Create a genre, or return the existing one with the same name
#[utoipa::path(
    post,
    path = "/genre/create",
    tag = "genres",
    request_body(
        content = GenreForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved genre id and url; a rejected submission returns GenreFormRejection", body = crate::models::SavedDocument),
        (status = 415, description = "Unsupported content type", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<GenreForm>,
) -> AppResult<Json<Submission<GenreFormRejection>>> {
    let submission = state.services.genres.create(form).await?;
    Ok(Json(submission))
}

/// Replace a genre
#[utoipa::path(
    put,
    path = "/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    request_body(
        content = GenreForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 200, description = "Saved genre id and url; a rejected submission returns GenreFormRejection", body = crate::models::SavedDocument),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(form): FormOrJson<GenreForm>,
) -> AppResult<Json<Submission<GenreFormRejection>>> {
    let submission = state.services.genres.update(parse_id(&id)?, form).await?;
    Ok(Json(submission))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/genre/{id}/delete",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre identifier"),
        ("additionalMetadata" = Option<String>, Query, description = "Unused")
    ),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteResponse),
        (status = 400, description = "Invalid ID supplied", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let response = state.services.genres.delete(parse_id(&id)?).await?;
    Ok(Json(response))
}

/// Delete every genre
#[utoipa::path(
    delete,
    path = "/genres/delete",
    tag = "genres",
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteAllResponse),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_genres(
    State(state): State<AppState>,
) -> AppResult<Json<DeleteAllResponse>> {
    let response = state.services.genres.delete_all().await?;
    Ok(Json(response))
}
