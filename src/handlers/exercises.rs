// handlers/exercises.rs - POST /api/users/:id/exercises

use axum::{extract::State, Json};
use chrono::Utc;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{JsonOrForm, UserId};
use crate::services::{CreateExerciseRequest, ExerciseAdded};

/// Append an exercise to the user's log and echo it back.
///
/// Read-modify-write on the user document; concurrent appends to the same
/// user are last write wins.
pub async fn create(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonOrForm(body): JsonOrForm<CreateExerciseRequest>,
) -> Result<Json<ExerciseAdded>, ApiError> {
    let mut user = state.store.find_by_id(&id).await?.ok_or_else(|| {
        tracing::debug!("Exercise for unknown user {}", id);
        ApiError::user_not_found()
    })?;

    user.push_exercise(body.into_exercise(Utc::now())?);
    let saved = state.store.save(&user).await?;

    let added = saved
        .exercises
        .last()
        .ok_or_else(|| ApiError::internal_server_error("saved user has an empty log"))?;

    Ok(Json(ExerciseAdded::new(&saved, added)))
}
