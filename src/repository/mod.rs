//! Repository layer for catalog persistence
//!
//! Each collection is exposed through its own store trait. [`Repository`] is the
//! handle injected into services; it wraps whichever backend `main` built.

pub mod memory;
pub mod postgres;

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, Genre, GenreData,
    },
};

#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors ordered by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn authors_insert(&self, data: &AuthorData) -> AppResult<Author>;
    /// Replaces every field; `None` when no author has this id
    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>>;
    /// Returns the removed author, if any
    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_delete_all(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books ordered by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_insert(&self, data: &BookData) -> AppResult<Book>;
    async fn books_replace(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_delete_all(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres ordered by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    /// Case-insensitive lookup by name
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    /// Inserts unless a genre with the same name, ignoring case, exists.
    /// Returns the stored genre and whether this call created it.
    async fn genres_insert(&self, data: &GenreData) -> AppResult<(Genre, bool)>;
    async fn genres_replace(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_delete_all(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// All instances in insertion order
    async fn instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn instances_insert(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn instances_replace(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>>;
    async fn instances_delete(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn instances_delete_all(&self) -> AppResult<u64>;
}

/// A complete catalog backend
#[async_trait]
pub trait CatalogStore: AuthorStore + BookStore + GenreStore + BookInstanceStore {
    /// Checks the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Handle to the catalog store shared by all services
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CatalogStore>,
}

impl Repository {
    pub fn new(store: impl CatalogStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(postgres::PgStore::new(pool))
    }

    /// Repository backed by process memory
    pub fn in_memory() -> Self {
        Self::new(memory::MemoryStore::default())
    }
}

impl Deref for Repository {
    type Target = dyn CatalogStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
