use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Errors from a `UserStore`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Username is required")]
    MissingUsername,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlx(err))
    }
}

/// Persistent collection of user documents.
///
/// Each call is a single-document operation; there is no cross-call
/// transaction. `save` replaces the stored exercise list, so two concurrent
/// read-modify-write cycles on one user resolve as last write wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user, in creation order
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// Look up by id. Unknown and malformed ids both yield `None`.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user with an empty exercise log
    async fn create(&self, username: &str) -> Result<User, StoreError>;

    /// Persist the user's exercise list and return the stored document
    async fn save(&self, user: &User) -> Result<User, StoreError>;

    /// Connectivity check for `/health`
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Ids are UUIDs; anything else can never match a stored user
pub fn parse_user_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Required-field check shared by every backend
pub fn validate_username(username: &str) -> Result<(), StoreError> {
    if username.is_empty() {
        return Err(StoreError::MissingUsername);
    }
    Ok(())
}
