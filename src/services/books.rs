//! Book service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookDetail, BookEditContext, BookForm, BookFormRejection, BookWithAuthor,
        DeleteAllResponse, DeleteResponse, FieldError, Genre, GenreChoice, PopulatedBook,
        SavedDocument, Submission,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books ordered by title, each with its author populated
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = self.repository.books_list().await?;
        self.with_authors(books).await
    }

    async fn with_authors(&self, books: Vec<Book>) -> AppResult<Vec<BookWithAuthor>> {
        let mut ids: Vec<Uuid> = books.iter().map(|b| b.author).collect();
        ids.sort();
        ids.dedup();
        let authors = self.repository.authors_get_many(&ids).await?;

        Ok(books
            .into_iter()
            .map(|book| BookWithAuthor {
                author: authors.iter().find(|a| a.id == book.author).cloned(),
                id: book.id,
                title: book.title,
                url: book.url,
            })
            .collect())
    }

    async fn populate(&self, book: Book) -> AppResult<PopulatedBook> {
        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&book.genre),
        )?;
        Ok(book.populate(author, &genres))
    }

    /// Book with author and genres populated
    pub async fn get(&self, id: Uuid) -> AppResult<PopulatedBook> {
        let book = self
            .repository
            .books_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        self.populate(book).await
    }

    /// Populated book and its copies, fetched concurrently
    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, book_instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.instances_by_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        Ok(BookDetail {
            book: self.populate(book).await?,
            book_instances,
        })
    }

    /// Books and genres side by side
    pub async fn with_genres(&self) -> AppResult<(Vec<BookWithAuthor>, Vec<Genre>)> {
        tokio::try_join!(self.list(), self.repository.genres_list())
    }

    /// Populated book with every author and genre to choose from
    pub async fn edit_context(&self, id: Uuid) -> AppResult<BookEditContext> {
        let (book, authors, genres) = tokio::try_join!(
            self.get(id),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let selected: Vec<String> = book.genre.iter().map(|g| g.id.to_string()).collect();

        Ok(BookEditContext {
            book,
            authors,
            genres: GenreChoice::from_genres(genres, &selected),
        })
    }

    async fn rejection(
        &self,
        title: &str,
        book: BookForm,
        errors: Vec<FieldError>,
    ) -> AppResult<Submission<BookFormRejection>> {
        tracing::debug!("{} rejected: {} error(s)", title, errors.len());
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let genres = GenreChoice::from_genres(genres, &book.genre);

        Ok(Submission::Rejected(BookFormRejection {
            title: title.to_string(),
            authors,
            genres,
            book,
            errors,
        }))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Submission<BookFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((book, errors)) => return self.rejection("Create Book", book, errors).await,
        };

        let book = self.repository.books_insert(&data).await?;
        tracing::info!("Book created: id={}", book.id);
        Ok(Submission::Saved(SavedDocument {
            id: book.id,
            url: book.url,
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookForm,
    ) -> AppResult<Submission<BookFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((book, errors)) => return self.rejection("Update Book", book, errors).await,
        };

        let book = self
            .repository
            .books_replace(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Book updated: id={}", book.id);
        Ok(Submission::Saved(SavedDocument {
            id: book.id,
            url: book.url,
        }))
    }

    /// Copies of the book are left in place
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteResponse> {
        let removed = self.repository.books_delete(id).await?;
        if removed.is_none() {
            tracing::warn!("Book delete matched no document: id={}", id);
        }
        Ok(DeleteResponse {
            message: "Successfully deleted book.".to_string(),
            deleted: removed.is_some(),
        })
    }

    pub async fn delete_all(&self) -> AppResult<DeleteAllResponse> {
        let deleted_count = self.repository.books_delete_all().await?;
        tracing::info!("Deleted all books: {}", deleted_count);
        Ok(DeleteAllResponse {
            message: "Successfully deleted all books.".to_string(),
            deleted_count,
        })
    }
}
