use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The `:id` path segment of a user route.
///
/// A segment that cannot be decoded can never name a user, so it is
/// reported as not found.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await.map_err(|e| {
            tracing::debug!("Undecodable user id: {}", e);
            ApiError::user_not_found()
        })?;
        Ok(Self(id))
    }
}

/// Query string extractor whose failures are internal errors, not 400s
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await.map_err(|e| {
            tracing::error!("Rejected query string: {}", e);
            ApiError::internal_server_error(e.body_text())
        })?;
        Ok(Self(value))
    }
}
