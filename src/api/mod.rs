//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{
        header::{self, HeaderName, HeaderValue},
        Uri,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::CATALOG_PREFIX,
    AppState,
};

/// Request body accepted either as JSON or as an url-encoded form.
///
/// Repeated form keys (`genre=a&genre=b`) deserialize into sequences.
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(FormOrJson(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let axum_extra::extract::Form(value) =
                axum_extra::extract::Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(FormOrJson(value))
        } else {
            Err(AppError::UnsupportedMediaType(format!(
                "Expected application/json or application/x-www-form-urlencoded, got {:?}",
                content_type
            )))
        }
    }
}

/// Parses a document identifier taken from the path
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid ID supplied".to_string()))
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!("No route for {}", uri);
    AppError::NotFound("Not Found".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/delete", delete(books::delete_all_books))
        .route("/book/genre", get(books::list_books_and_genres))
        .route("/book/create", post(books::create_book))
        .route("/book/:id", get(books::get_book))
        .route(
            "/book/:id/update",
            get(books::book_update_form).put(books::update_book),
        )
        .route("/book/:id/delete", delete(books::delete_book))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors/delete", delete(authors::delete_all_authors))
        .route("/author/create", post(authors::create_author))
        .route("/author/:id", get(authors::get_author))
        .route(
            "/author/:id/update",
            get(authors::author_update_form).put(authors::update_author),
        )
        .route("/author/:id/delete", delete(authors::delete_author))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genres/delete", delete(genres::delete_all_genres))
        .route("/genre/create", post(genres::create_genre))
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/update",
            get(genres::genre_update_form).put(genres::update_genre),
        )
        .route("/genre/:id/delete", delete(genres::delete_genre))
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstances/delete",
            delete(book_instances::delete_all_book_instances),
        )
        .route("/bookinstance/name", get(book_instances::book_titles))
        .route("/bookinstance/create", post(book_instances::create_book_instance))
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::book_instance_update_form)
                .put(book_instances::update_book_instance),
        )
        .route(
            "/bookinstance/:id/delete",
            delete(book_instances::delete_book_instance),
        )
        .with_state(state.clone());

    let openapi = openapi::openapi_router(&state.config.docs);

    Router::new()
        .nest(CATALOG_PREFIX, catalog)
        .merge(openapi)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_DNS_PREFETCH_CONTROL,
                    HeaderValue::from_static("off"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_XSS_PROTECTION,
                    HeaderValue::from_static("0"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static("max-age=15552000; includeSubDomains"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-permitted-cross-domain-policies"),
                    HeaderValue::from_static("none"),
                )),
        )
}
