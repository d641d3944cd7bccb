use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::User;
use crate::database::store::{parse_user_id, validate_username, StoreError, UserStore};

/// Process-local `UserStore`, used for local runs and tests.
///
/// Users are kept in creation order.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Some(uuid) = parse_user_id(id) else {
            return Ok(None);
        };
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == uuid).cloned())
    }

    async fn create(&self, username: &str) -> Result<User, StoreError> {
        validate_username(username)?;

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let user = User::new(username);
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound(user.id.to_string()))?;

        stored.exercises = user.exercises.clone();
        Ok(stored.clone())
    }
}
