//! PostgreSQL catalog store
//!
//! Collections are plain tables keyed by UUID. References between documents are
//! stored without foreign keys so that deleting a document never cascades to, or
//! is blocked by, the documents pointing at it.

mod authors;
mod book_instances;
mod books;
mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::CatalogStore;
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations
    pub async fn migrate(pool: &Pool<Postgres>) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
