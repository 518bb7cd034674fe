//! Book instance queries

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, BookInstanceData},
    repository::BookInstanceStore,
};

const COLUMNS: &str = "id, book, imprint, status, due_back";

#[derive(FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book: Uuid,
    imprint: String,
    status: String,
    due_back: NaiveDate,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(AppError::Internal)?;
        Ok(BookInstance::new(
            row.id,
            BookInstanceData {
                book: row.book,
                imprint: row.imprint,
                status,
                due_back: row.due_back,
            },
        ))
    }
}

fn convert(rows: Vec<BookInstanceRow>) -> AppResult<Vec<BookInstance>> {
    rows.into_iter().map(BookInstance::try_from).collect()
}

#[async_trait]
impl BookInstanceStore for PgStore {
    async fn instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances ORDER BY crea_date ASC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE book = $1 ORDER BY crea_date ASC, id ASC",
            COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        convert(rows)
    }

    async fn instances_insert(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            INSERT INTO book_instances (book, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn instances_replace(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            UPDATE book_instances
            SET book = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    async fn instances_delete(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>(&format!(
            "DELETE FROM book_instances WHERE id = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    async fn instances_delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM book_instances")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
