//! Author service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorDetail, AuthorForm, AuthorFormRejection, Book, DeleteAllResponse,
        DeleteResponse, SavedDocument, Submission,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .authors_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Author together with the books written by them, fetched concurrently
    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        Ok(AuthorDetail {
            author,
            author_books: books.iter().map(Book::summary).collect(),
        })
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Submission<AuthorFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((author, errors)) => {
                tracing::debug!("Author create rejected: {} error(s)", errors.len());
                return Ok(Submission::Rejected(AuthorFormRejection {
                    title: "Create Author".to_string(),
                    author,
                    errors,
                }));
            }
        };

        let author = self.repository.authors_insert(&data).await?;
        tracing::info!("Author created: id={}", author.id);
        Ok(Submission::Saved(SavedDocument {
            id: author.id,
            url: author.url,
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: AuthorForm,
    ) -> AppResult<Submission<AuthorFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((author, errors)) => {
                return Ok(Submission::Rejected(AuthorFormRejection {
                    title: "Update Author".to_string(),
                    author,
                    errors,
                }));
            }
        };

        let author = self
            .repository
            .authors_replace(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Author updated: id={}", author.id);
        Ok(Submission::Saved(SavedDocument {
            id: author.id,
            url: author.url,
        }))
    }

    /// Books referencing the author are left in place
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteResponse> {
        let removed = self.repository.authors_delete(id).await?;
        if removed.is_none() {
            tracing::warn!("Author delete matched no document: id={}", id);
        }
        Ok(DeleteResponse {
            message: "Successfully deleted author.".to_string(),
            deleted: removed.is_some(),
        })
    }

    pub async fn delete_all(&self) -> AppResult<DeleteAllResponse> {
        let deleted_count = self.repository.authors_delete_all().await?;
        tracing::info!("Deleted all authors: {}", deleted_count);
        Ok(DeleteAllResponse {
            message: "Successfully deleted all authors.".to_string(),
            deleted_count,
        })
    }
}
