//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::server::{Server, ServerBuilder},
    OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{authors, book_instances, books, genres, health},
    config::DocsConfig,
    models::CATALOG_PREFIX,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary Catalog API",
        version = "1.0.0",
        description = "Catalog of a small local library: authors, books, genres and the copies held",
        license(name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::list_books_and_genres,
        books::get_book,
        books::book_update_form,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::delete_all_books,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::author_update_form,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        authors::delete_all_authors,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::genre_update_form,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        genres::delete_all_genres,
        // Book instances
        book_instances::list_book_instances,
        book_instances::book_titles,
        book_instances::get_book_instance,
        book_instances::book_instance_update_form,
        book_instances::create_book_instance,
        book_instances::update_book_instance,
        book_instances::delete_book_instance,
        book_instances::delete_all_book_instances,
    ),
    components(
        schemas(
            // Authors
            crate::models::Author,
            crate::models::AuthorForm,
            crate::models::AuthorFormRejection,
            authors::AuthorListResponse,
            authors::AuthorDetailResponse,
            authors::AuthorFormResponse,
            // Books
            crate::models::Book,
            crate::models::PopulatedBook,
            crate::models::BookWithAuthor,
            crate::models::BookSummary,
            crate::models::BookTitle,
            crate::models::BookForm,
            crate::models::BookFormRejection,
            crate::models::GenreChoice,
            books::BookListResponse,
            books::BookDetailResponse,
            books::BookGenreResponse,
            books::BookFormResponse,
            // Genres
            crate::models::Genre,
            crate::models::GenreForm,
            crate::models::GenreFormRejection,
            genres::GenreListResponse,
            genres::GenreDetailResponse,
            genres::GenreFormResponse,
            // Book instances
            crate::models::BookInstance,
            crate::models::BookStatus,
            crate::models::PopulatedBookInstance,
            crate::models::BookInstanceForm,
            crate::models::BookInstanceFormRejection,
            book_instances::BookInstanceListResponse,
            book_instances::BookInstanceDetailResponse,
            book_instances::BookTitlesResponse,
            book_instances::BookInstanceFormResponse,
            // Shared
            crate::models::FieldError,
            crate::models::SavedDocument,
            crate::models::DeleteResponse,
            crate::models::DeleteAllResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors"),
        (name = "genres", description = "Genres"),
        (name = "bookinstances", description = "Physical copies of books")
    )
)]
pub struct ApiDoc;

/// Servers advertised by the document; the catalog mount point when none is configured
fn servers(docs: &DocsConfig) -> Vec<Server> {
    let configured = [
        (docs.local_url.as_deref(), "Local server"),
        (docs.cloud_url.as_deref(), "Cloud server"),
    ];

    let servers: Vec<Server> = configured
        .into_iter()
        .filter_map(|(url, description)| {
            url.filter(|u| !u.is_empty()).map(|u| {
                ServerBuilder::new()
                    .url(u)
                    .description(Some(description))
                    .build()
            })
        })
        .collect();

    if servers.is_empty() {
        vec![Server::new(CATALOG_PREFIX)]
    } else {
        servers
    }
}

/// Build the OpenAPI document for the given documentation settings
pub fn openapi(docs: &DocsConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(servers(docs));
    doc
}

/// Create the OpenAPI documentation router
pub fn openapi_router(docs: &DocsConfig) -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi(docs)))
}
