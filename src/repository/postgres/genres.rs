//! Genre queries

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::PgStore;
use crate::{
    error::{AppError, AppResult},
    models::{Genre, GenreData},
    repository::GenreStore,
};

#[derive(FromRow)]
struct GenreRow {
    id: Uuid,
    name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::new(row.id, GenreData { name: row.name })
    }
}

#[async_trait]
impl GenreStore for PgStore {
    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Genre::from))
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name FROM genres WHERE id = ANY($1) ORDER BY name ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name FROM genres WHERE LOWER(name) = LOWER($1) LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn genres_insert(&self, data: &GenreData) -> AppResult<(Genre, bool)> {
        let inserted = sqlx::query_as::<_, GenreRow>(
            r#"
            INSERT INTO genres (name)
            VALUES ($1)
            ON CONFLICT ((LOWER(name))) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = inserted {
            return Ok((row.into(), true));
        }

        // The conflicting row is committed, so the lookup sees it unless it
        // was deleted in between.
        self.genres_find_by_name(&data.name)
            .await?
            .map(|existing| (existing, false))
            .ok_or_else(|| {
                AppError::Internal(format!("Genre {:?} vanished during insert", data.name))
            })
    }

    async fn genres_replace(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "DELETE FROM genres WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn genres_delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM genres").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
