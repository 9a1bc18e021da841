use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Allocation exhausted: {0}")]
    AllocationExhausted(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Whether the caller may safely retry after re-checking state
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

/// SQLSTATEs for deadlock and serialization failures; the transaction was
/// rolled back and may be retried as a whole.
const RETRYABLE_SQLSTATES: [&str; 2] = ["40P01", "40001"];

const UNIQUE_VIOLATION: &str = "23505";

/// Map a database SQLSTATE to the error kind callers act on, if it has one
fn from_sqlstate(code: &str, message: &str) -> Option<AppError> {
    if RETRYABLE_SQLSTATES.contains(&code) {
        return Some(AppError::StoreUnavailable(format!("{} ({})", message, code)));
    }
    if code == UNIQUE_VIOLATION {
        return Some(AppError::Conflict(message.to_string()));
    }
    None
}

/// Transport-level failures and aborted transactions are transient; a unique
/// violation means another writer got there first.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            let code = db.code().map(|c| c.into_owned());
            if let Some(mapped) = code.and_then(|c| from_sqlstate(&c, db.message())) {
                return mapped;
            }
        }

        match e {
            sqlx::Error::PoolTimedOut => {
                AppError::StoreUnavailable("timed out acquiring a connection".to_string())
            }
            sqlx::Error::PoolClosed => {
                AppError::StoreUnavailable("connection pool is closed".to_string())
            }
            sqlx::Error::Io(ref io) => AppError::StoreUnavailable(io.to_string()),
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let transient = self.is_transient();
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::StoreUnavailable(ref msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Store temporarily unavailable, retry later".to_string(),
                    None,
                )
            }
            AppError::AllocationExhausted(ref msg) => {
                tracing::error!("Code allocation invariant violated: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not allocate a code".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        let mut response = (status, body).into_response();
        if transient {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
