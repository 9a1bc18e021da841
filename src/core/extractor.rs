//! Extractors whose rejections use the `ApiResponse` error envelope.
//!
//! axum's own extractors reject with plain-text bodies; every handler input
//! goes through one of these wrappers instead.

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::AuthenticatedCoach;
use crate::shared::constants::COACH_ID_HEADER;

/// JSON request body
pub struct AppJson<T>(pub T);

/// Query string
pub struct AppQuery<T>(pub T);

/// Path parameters
pub struct AppPath<T>(pub T);

fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a request body with Content-Type: application/json".to_string()
        }
        other => format!("Failed to read JSON body: {}", other.body_text()),
    };
    AppError::BadRequest(message)
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
}

fn path_rejection(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => {
            AppError::BadRequest(format!("Invalid path parameter: {}", err.body_text()))
        }
        // The route and the handler disagree on the parameters
        other => AppError::Internal(other.body_text()),
    }
}

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(value))
    }
}

/// Reads the identity placed by `identity_middleware`. A handler mounted
/// outside that middleware never sees one, whatever headers the caller sent.
impl<S> FromRequestParts<S> for AuthenticatedCoach
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedCoach>()
            .cloned()
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "No verified coach identity; requests must carry the {} header",
                    COACH_ID_HEADER
                ))
            })
    }
}
