// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::database::store::StoreError;
use crate::types::CoercionError;

/// Body text for every 500; the underlying cause is only logged
pub const GENERIC_ERROR: &str = "There was an error while processing your request.";

pub const USER_NOT_FOUND: &str = "User not found";

/// The two error kinds a client can observe
#[derive(Debug)]
pub enum ApiError {
    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(_) => GENERIC_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn user_not_found() -> Self {
        ApiError::not_found(USER_NOT_FOUND)
    }

    /// The detail is for the server log, never the response body
    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        ApiError::InternalServerError(detail.into())
    }
}

// Convert other error types to ApiError
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                tracing::debug!("User disappeared during request: {}", id);
                ApiError::user_not_found()
            }
            StoreError::DuplicateUsername(name) => {
                tracing::error!("Username already taken: {}", name);
                ApiError::internal_server_error(format!("duplicate username {}", name))
            }
            StoreError::MissingUsername => {
                tracing::error!("User creation without a username");
                ApiError::internal_server_error("missing username")
            }
            StoreError::Database(db) => db.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<CoercionError> for ApiError {
    fn from(err: CoercionError) -> Self {
        tracing::error!("Rejected request value: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "not found: {}", msg),
            ApiError::InternalServerError(detail) => write!(f, "internal error: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
