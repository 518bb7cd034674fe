//! Genre service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, DeleteAllResponse, DeleteResponse, FieldError, Genre, GenreDetail, GenreForm,
        GenreFormRejection, SavedDocument, Submission,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.repository
            .genres_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Genre with the books filed under it, fetched concurrently
    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        Ok(GenreDetail {
            genre,
            genre_books: books.iter().map(Book::summary).collect(),
        })
    }

    /// Creates the genre unless one with the same name already exists, in
    /// which case the existing genre is returned
    pub async fn create(&self, form: GenreForm) -> AppResult<Submission<GenreFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((genre, errors)) => {
                return Ok(Submission::Rejected(GenreFormRejection {
                    title: "Create Genre".to_string(),
                    genre,
                    errors,
                }));
            }
        };

        let (genre, created) = self.repository.genres_insert(&data).await?;
        if created {
            tracing::info!("Genre created: id={}", genre.id);
        } else {
            tracing::info!("Genre {:?} already exists: id={}", data.name, genre.id);
        }
        Ok(Submission::Saved(SavedDocument {
            id: genre.id,
            url: genre.url,
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: GenreForm,
    ) -> AppResult<Submission<GenreFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((genre, errors)) => {
                return Ok(Submission::Rejected(GenreFormRejection {
                    title: "Update Genre".to_string(),
                    genre,
                    errors,
                }));
            }
        };

        if let Some(other) = self.repository.genres_find_by_name(&data.name).await? {
            if other.id != id {
                tracing::info!("Genre {:?} already in use: id={}", data.name, other.id);
                return Ok(Submission::Rejected(GenreFormRejection {
                    title: "Update Genre".to_string(),
                    errors: vec![FieldError {
                        location: "body".to_string(),
                        param: "name".to_string(),
                        value: data.name.clone(),
                        msg: "Genre name already exists".to_string(),
                    }],
                    genre: GenreForm { name: data.name },
                }));
            }
        }

        let genre = self
            .repository
            .genres_replace(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Genre updated: id={}", genre.id);
        Ok(Submission::Saved(SavedDocument {
            id: genre.id,
            url: genre.url,
        }))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteResponse> {
        let removed = self.repository.genres_delete(id).await?;
        if removed.is_none() {
            tracing::warn!("Genre delete matched no document: id={}", id);
        }
        Ok(DeleteResponse {
            message: "Successfully deleted genre.".to_string(),
            deleted: removed.is_some(),
        })
    }

    pub async fn delete_all(&self) -> AppResult<DeleteAllResponse> {
        let deleted_count = self.repository.genres_delete_all().await?;
        tracing::info!("Deleted all genres: {}", deleted_count);
        Ok(DeleteAllResponse {
            message: "Successfully deleted all genres.".to_string(),
            deleted_count,
        })
    }
}
