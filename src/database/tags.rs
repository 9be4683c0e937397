use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Tag;
use crate::database::TagStore;

/// Postgres-backed tag store.
pub struct PgTagStore {
    pool: PgPool,
}

impl PgTagStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_env() -> Result<Self, DatabaseError> {
        Ok(Self::new(DatabaseManager::pool().await?))
    }
}

#[async_trait]
impl TagStore for PgTagStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, tag_name FROM tags WHERE tag_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tag)
    }

    async fn insert(&self, name: &str) -> Result<Tag, DatabaseError> {
        // Upsert so two concurrent creates racing on a new name converge on
        // the same row instead of one of them failing the unique index.
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (tag_name)
             VALUES ($1)
             ON CONFLICT (tag_name) DO UPDATE SET tag_name = EXCLUDED.tag_name
             RETURNING id, tag_name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }
}
