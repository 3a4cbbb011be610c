//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewShort, Short, ShortFilter, ShortPatch};
use crate::domain::repositories::Repository;
use crate::error::AppError;

const COLUMNS: &str = "id, code, url, is_activated, expires_at, created_at, last_updated_at";

/// PostgreSQL repository for the `shorts` table.
///
/// Each call runs as one auto-committed statement on a pooled connection.
pub struct PgShortRepository {
    pool: Arc<PgPool>,
}

impl PgShortRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgShortRepository {
    type Entity = Short;
    type Filter = ShortFilter;
    type New = NewShort;
    type Patch = ShortPatch;

    async fn get_all(&self, limit: Option<i64>) -> Result<Vec<Short>, AppError> {
        let rows = sqlx::query_as::<_, Short>(&format!(
            "SELECT {COLUMNS} FROM shorts ORDER BY created_at, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn get(&self, filter: ShortFilter) -> Result<Option<Short>, AppError> {
        let row = match filter {
            ShortFilter::Id(id) => {
                sqlx::query_as::<_, Short>(&format!("SELECT {COLUMNS} FROM shorts WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(self.pool.as_ref())
                    .await?
            }
            ShortFilter::Code(code) => {
                sqlx::query_as::<_, Short>(&format!(
                    "SELECT {COLUMNS} FROM shorts WHERE code = $1"
                ))
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?
            }
        };

        Ok(row)
    }

    async fn add(&self, new: NewShort) -> Result<Short, AppError> {
        let row = sqlx::query_as::<_, Short>(&format!(
            r#"
            INSERT INTO shorts (id, code, url, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.code)
        .bind(new.url)
        .bind(new.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn update(&self, entity: Short, patch: ShortPatch) -> Result<Short, AppError> {
        let (set_expires_at, expires_at) = match patch.expires_at {
            Some(value) => (true, value),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, Short>(&format!(
            r#"
            UPDATE shorts SET
                code = COALESCE($2, code),
                url = COALESCE($3, url),
                is_activated = COALESCE($4, is_activated),
                expires_at = CASE WHEN $5::boolean THEN $6::timestamptz ELSE expires_at END,
                last_updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(entity.id)
        .bind(patch.code)
        .bind(patch.url)
        .bind(patch.is_activated)
        .bind(set_expires_at)
        .bind(expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| AppError::not_found("Short link with such ID does not exist"))
    }

    async fn delete(&self, entity: Short) -> Result<Short, AppError> {
        let result = sqlx::query("DELETE FROM shorts WHERE id = $1")
            .bind(entity.id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short link with such ID does not exist",
            ));
        }

        Ok(entity)
    }
}
