//! In-memory catalog store
//!
//! Collections keep insertion order, like the natural order of a document
//! collection. Used by tests and by the `memory` database backend.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthorStore, BookInstanceStore, BookStore, CatalogStore, GenreStore};
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, Genre, GenreData,
    },
};

/// A document that knows its own identifier
trait Document: Clone + Send + Sync {
    fn id(&self) -> Uuid;
}

impl Document for Author {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Book {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Genre {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for BookInstance {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// One collection of documents
struct Collection<T> {
    docs: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Document> Collection<T> {
    async fn all(&self) -> Vec<T> {
        self.docs.read().await.clone()
    }

    async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.docs.read().await.iter().filter(|d| predicate(*d)).cloned().collect()
    }

    async fn get(&self, id: Uuid) -> Option<T> {
        self.docs.read().await.iter().find(|d| d.id() == id).cloned()
    }

    async fn get_many(&self, ids: &[Uuid]) -> Vec<T> {
        self.filter(|d| ids.contains(&d.id())).await
    }

    async fn insert(&self, build: impl FnOnce(Uuid) -> T) -> T {
        let doc = build(Uuid::new_v4());
        self.docs.write().await.push(doc.clone());
        doc
    }

    /// Inserts unless a matching document exists; the check and the insert
    /// hold the same write lock
    async fn insert_unless(
        &self,
        matches: impl Fn(&T) -> bool,
        build: impl FnOnce(Uuid) -> T,
    ) -> (T, bool) {
        let mut docs = self.docs.write().await;
        if let Some(existing) = docs.iter().find(|d| matches(*d)) {
            return (existing.clone(), false);
        }
        let doc = build(Uuid::new_v4());
        docs.push(doc.clone());
        (doc, true)
    }

    async fn replace(&self, id: Uuid, build: impl FnOnce(Uuid) -> T) -> Option<T> {
        let mut docs = self.docs.write().await;
        let slot = docs.iter_mut().find(|d| d.id() == id)?;
        *slot = build(id);
        Some(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Option<T> {
        let mut docs = self.docs.write().await;
        let index = docs.iter().position(|d| d.id() == id)?;
        Some(docs.remove(index))
    }

    async fn clear(&self) -> u64 {
        let mut docs = self.docs.write().await;
        let count = docs.len() as u64;
        docs.clear();
        count
    }
}

#[derive(Default)]
pub struct MemoryStore {
    authors: Collection<Author>,
    books: Collection<Book>,
    genres: Collection<Genre>,
    instances: Collection<BookInstance>,
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.authors.all().await;
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.authors.get(id).await)
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        Ok(self.authors.get_many(ids).await)
    }

    async fn authors_insert(&self, data: &AuthorData) -> AppResult<Author> {
        Ok(self.authors.insert(|id| Author::new(id, data.clone())).await)
    }

    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        Ok(self.authors.replace(id, |id| Author::new(id, data.clone())).await)
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.authors.delete(id).await)
    }

    async fn authors_delete_all(&self) -> AppResult<u64> {
        Ok(self.authors.clear().await)
    }
}

fn by_title(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| a.title.cmp(&b.title));
    books
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        Ok(by_title(self.books.all().await))
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.get(id).await)
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        Ok(self.books.get_many(ids).await)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        Ok(by_title(self.books.filter(|b| b.author == author_id).await))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        Ok(by_title(self.books.filter(|b| b.genre.contains(&genre_id)).await))
    }

    async fn books_insert(&self, data: &BookData) -> AppResult<Book> {
        Ok(self.books.insert(|id| Book::new(id, data.clone())).await)
    }

    async fn books_replace(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        Ok(self.books.replace(id, |id| Book::new(id, data.clone())).await)
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.delete(id).await)
    }

    async fn books_delete_all(&self) -> AppResult<u64> {
        Ok(self.books.clear().await)
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self.genres.all().await;
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.genres.get(id).await)
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let mut genres = self.genres.get_many(ids).await;
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let name = name.to_lowercase();
        Ok(self
            .genres
            .filter(|g| g.name.to_lowercase() == name)
            .await
            .into_iter()
            .next())
    }

    async fn genres_insert(&self, data: &GenreData) -> AppResult<(Genre, bool)> {
        let name = data.name.to_lowercase();
        Ok(self
            .genres
            .insert_unless(
                |g| g.name.to_lowercase() == name,
                |id| Genre::new(id, data.clone()),
            )
            .await)
    }

    async fn genres_replace(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        Ok(self.genres.replace(id, |id| Genre::new(id, data.clone())).await)
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.genres.delete(id).await)
    }

    async fn genres_delete_all(&self) -> AppResult<u64> {
        Ok(self.genres.clear().await)
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.instances.all().await)
    }

    async fn instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.instances.get(id).await)
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        Ok(self.instances.filter(|i| i.book == book_id).await)
    }

    async fn instances_insert(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        Ok(self
            .instances
            .insert(|id| BookInstance::new(id, data.clone()))
            .await)
    }

    async fn instances_replace(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        Ok(self
            .instances
            .replace(id, |id| BookInstance::new(id, data.clone()))
            .await)
    }

    async fn instances_delete(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.instances.delete(id).await)
    }

    async fn instances_delete_all(&self) -> AppResult<u64> {
        Ok(self.instances.clear().await)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
