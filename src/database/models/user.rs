use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::serialize_number;

/// A user document with its embedded exercise log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub exercises: Vec<Exercise>,
}

/// One logged activity. Owned by its user; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_number")]
    pub duration: Option<f64>,
    pub date: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            exercises: Vec::new(),
        }
    }

    /// Exercises are append-only
    pub fn push_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }
}

/// Row shape of the `users` table; exercises live in a JSONB column
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub exercises: Json<Vec<Exercise>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            exercises: row.exercises.0,
        }
    }
}
