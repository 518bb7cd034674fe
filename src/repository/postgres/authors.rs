//! Author queries

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::AppResult,
    models::{Author, AuthorData},
    repository::AuthorStore,
};

const COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

#[derive(FromRow)]
struct AuthorRow {
    id: Uuid,
    first_name: String,
    family_name: String,
    date_of_birth: Option<NaiveDate>,
    date_of_death: Option<NaiveDate>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author::new(
            row.id,
            AuthorData {
                first_name: row.first_name,
                family_name: row.family_name,
                date_of_birth: row.date_of_birth,
                date_of_death: row.date_of_death,
            },
        )
    }
}

#[async_trait]
impl AuthorStore for PgStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors ORDER BY family_name ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {} FROM authors WHERE id = ANY($1)",
            COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn authors_insert(&self, data: &AuthorData) -> AppResult<Author> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "DELETE FROM authors WHERE id = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn authors_delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM authors").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
