//! Book instance service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookInstance, BookInstanceEditContext, BookInstanceForm, BookInstanceFormRejection,
        BookTitle, DeleteAllResponse, DeleteResponse, FieldError, PopulatedBookInstance,
        SavedDocument, Submission,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, each with its book populated
    pub async fn list(&self) -> AppResult<Vec<PopulatedBookInstance>> {
        let instances = self.repository.instances_list().await?;
        let mut ids: Vec<Uuid> = instances.iter().map(|i| i.book).collect();
        ids.sort();
        ids.dedup();
        let books = self.repository.books_get_many(&ids).await?;

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.iter().find(|b| b.id == instance.book).cloned();
                instance.populate(book)
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository
            .instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// A copy with its book populated
    pub async fn detail(&self, id: Uuid) -> AppResult<PopulatedBookInstance> {
        let instance = self.find(id).await?;
        let book = self.repository.books_get(instance.book).await?;
        Ok(instance.populate(book))
    }

    /// Titles of every book, for picking the book a copy belongs to
    pub async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        let books = self.repository.books_list().await?;
        Ok(books.iter().map(Book::title_only).collect())
    }

    pub async fn edit_context(&self, id: Uuid) -> AppResult<BookInstanceEditContext> {
        let instance = self.find(id).await?;
        let selected_book = instance.book;
        let (book, book_list) = tokio::try_join!(
            self.repository.books_get(selected_book),
            self.book_titles(),
        )?;

        Ok(BookInstanceEditContext {
            book_list,
            selected_book,
            bookinstance: instance.populate(book),
        })
    }

    async fn rejection(
        &self,
        title: &str,
        bookinstance: BookInstanceForm,
        errors: Vec<FieldError>,
    ) -> AppResult<Submission<BookInstanceFormRejection>> {
        tracing::debug!("{} rejected: {} error(s)", title, errors.len());
        let book_list = self.book_titles().await?;

        Ok(Submission::Rejected(BookInstanceFormRejection {
            title: title.to_string(),
            book_list,
            selected_book: bookinstance.book.clone(),
            errors,
            bookinstance,
        }))
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstanceFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((form, errors)) => return self.rejection("Create BookInstance", form, errors).await,
        };

        let instance = self.repository.instances_insert(&data).await?;
        tracing::info!("Book instance created: id={} book={}", instance.id, instance.book);
        Ok(Submission::Saved(SavedDocument {
            id: instance.id,
            url: instance.url,
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstanceFormRejection>> {
        let data = match form.check() {
            Ok(data) => data,
            Err((form, errors)) => return self.rejection("Update BookInstance", form, errors).await,
        };

        let instance = self
            .repository
            .instances_replace(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Book instance updated: id={}", instance.id);
        Ok(Submission::Saved(SavedDocument {
            id: instance.id,
            url: instance.url,
        }))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteResponse> {
        let removed = self.repository.instances_delete(id).await?;
        if removed.is_none() {
            tracing::warn!("Book instance delete matched no document: id={}", id);
        }
        Ok(DeleteResponse {
            message: "Successfully deleted book instance.".to_string(),
            deleted: removed.is_some(),
        })
    }

    pub async fn delete_all(&self) -> AppResult<DeleteAllResponse> {
        let deleted_count = self.repository.instances_delete_all().await?;
        tracing::info!("Deleted all book instances: {}", deleted_count);
        Ok(DeleteAllResponse {
            message: "Successfully deleted all book instances.".to_string(),
            deleted_count,
        })
    }
}
