use async_trait::async_trait;
use sqlx::PgPool;

use super::SequenceStore;
use crate::core::error::{AppError, Result};

/// Postgres-backed counters in the `sequences` table
pub struct PgSequenceStore {
    pool: PgPool,
}

impl PgSequenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for PgSequenceStore {
    async fn increment(&self, prefix: &str, initial: i64) -> Result<i64> {
        let number: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sequences (prefix, number)
            VALUES ($1, $2)
            ON CONFLICT (prefix)
            DO UPDATE SET number = sequences.number + 1, updated_at = NOW()
            RETURNING number
            "#,
        )
        .bind(prefix)
        .bind(initial)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to advance sequence '{}': {:?}", prefix, e);
            AppError::from(e)
        })?;

        Ok(number)
    }

    async fn reset_if_above(&self, prefix: &str, ceiling: i64, value: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sequences
            SET number = $3, updated_at = NOW()
            WHERE prefix = $1 AND number > $2
            "#,
        )
        .bind(prefix)
        .bind(ceiling)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reset sequence '{}': {:?}", prefix, e);
            AppError::from(e)
        })?;

        Ok(result.rows_affected() == 1)
    }
}
