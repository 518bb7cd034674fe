//! Catalog services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use crate::{
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            repository,
        }
    }

    /// Fails when the backing store cannot be reached
    pub async fn check_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
