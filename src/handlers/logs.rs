// handlers/logs.rs - GET /api/users/:id/logs

use axum::{extract::State, Json};
use chrono::Utc;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiQuery, UserId};
use crate::services::{ExerciseLog, LogFilter, LogQuery};

/// The user's exercises within `[from, to]`, in append order, capped at `limit`
pub async fn get(
    State(state): State<AppState>,
    UserId(id): UserId,
    ApiQuery(query): ApiQuery<LogQuery>,
) -> Result<Json<ExerciseLog>, ApiError> {
    let filter = LogFilter::from_query(&query, Utc::now());

    let user = state.store.find_by_id(&id).await?.ok_or_else(|| {
        tracing::debug!("Log requested for unknown user {}", id);
        ApiError::user_not_found()
    })?;

    Ok(Json(ExerciseLog::build(&user, &filter)))
}
