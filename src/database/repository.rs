use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tracing::debug;

use crate::database::manager::DatabaseManager;
use crate::database::models::{User, UserRow};
use crate::database::store::{parse_user_id, validate_username, StoreError, UserStore};

/// `UserStore` over the PostgreSQL `users` table.
///
/// The exercise log is embedded in the row as a JSONB document, so a user
/// and its exercises are always read and written together.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, exercises FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(uuid) = parse_user_id(id) else {
            debug!("Malformed user id: {}", id);
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, exercises FROM users WHERE id = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, username: &str) -> Result<User, StoreError> {
        validate_username(username)?;
        let user = User::new(username);

        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, username, exercises) VALUES ($1, $2, $3) \
             RETURNING id, username, exercises",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(Json(&user.exercises))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET exercises = $2 WHERE id = $1 RETURNING id, username, exercises",
        )
        .bind(user.id)
        .bind(Json(&user.exercises))
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| StoreError::NotFound(user.id.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await?;
        Ok(())
    }
}
