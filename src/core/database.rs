use crate::core::config::DatabaseConfig;
use crate::core::error::{AppError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::future::Future;
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Run a store-backed operation under a deadline.
///
/// When the deadline elapses the future is dropped, which rolls back any open
/// transaction it owned, and the caller sees `StoreUnavailable` (outcome
/// unknown, re-check state before retrying a non-idempotent step).
pub async fn with_deadline<T, F>(deadline: Duration, operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} exceeded deadline of {:?}", operation, deadline);
            Err(AppError::StoreUnavailable(format!(
                "{} timed out after {}ms",
                operation,
                deadline.as_millis()
            )))
        }
    }
}
