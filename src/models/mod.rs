//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod validation;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorDetail, AuthorForm, AuthorFormRejection};
pub use book::{
    Book, BookData, BookDetail, BookEditContext, BookForm, BookFormRejection, BookSummary,
    BookTitle, BookWithAuthor, GenreChoice, PopulatedBook,
};
pub use book_instance::{
    BookInstance, BookInstanceData, BookInstanceEditContext, BookInstanceForm,
    BookInstanceFormRejection, BookStatus, PopulatedBookInstance,
};
pub use genre::{Genre, GenreData, GenreDetail, GenreForm, GenreFormRejection};
pub use validation::FieldError;

/// Mount point of the catalog router, used to build display URLs
pub const CATALOG_PREFIX: &str = "/catalog";

/// Display URL of a document, e.g. `/catalog/author/<id>`
pub fn catalog_url(kind: &str, id: Uuid) -> String {
    format!("{}/{}/{}", CATALOG_PREFIX, kind, id)
}

/// Identifier and display URL of a persisted document
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SavedDocument {
    pub id: Uuid,
    pub url: String,
}

/// Outcome of a create or update submission.
///
/// A rejected submission carries the echoed form and its errors; nothing was written.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Submission<R> {
    Saved(SavedDocument),
    Rejected(R),
}

impl<R> Submission<R> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Submission::Saved(_))
    }
}

/// Confirmation of a single-document delete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    /// Whether a document matched the identifier
    pub deleted: bool,
}

/// Confirmation of a collection-wide delete
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted_count: u64,
}
