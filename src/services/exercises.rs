use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Exercise, User};
use crate::types::{render_date, serialize_number, CoercionError, Scalar};

/// Body of `POST /api/users/:id/exercises`, as JSON or form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExerciseRequest {
    pub description: Option<Scalar>,
    pub duration: Option<Scalar>,
    pub date: Option<Scalar>,
}

impl CreateExerciseRequest {
    /// Coerce the loosely typed body into a stored exercise.
    ///
    /// Blank values count as absent; a missing date is stamped with `now`.
    pub fn into_exercise(self, now: DateTime<Utc>) -> Result<Exercise, CoercionError> {
        let description = present(self.description).map(Scalar::into_text);
        let duration = present(self.duration)
            .map(|d| d.to_number("duration"))
            .transpose()?;
        let date = match present(self.date) {
            Some(date) => date.to_date("date")?,
            None => now,
        };

        Ok(Exercise {
            description,
            duration,
            date,
        })
    }
}

fn present(value: Option<Scalar>) -> Option<Scalar> {
    value.filter(|v| !v.is_blank())
}

/// Response for a newly appended exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseAdded {
    pub username: String,
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_number")]
    pub duration: Option<f64>,
    pub date: String,
    pub id: String,
}

impl ExerciseAdded {
    pub fn new(user: &User, exercise: &Exercise) -> Self {
        Self {
            username: user.username.clone(),
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: render_date(&exercise.date),
            id: user.id.to_string(),
        }
    }
}
