// handlers/users.rs - GET/POST /api/users

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::JsonOrForm;
use crate::types::Scalar;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<Scalar>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: String,
    pub username: String,
}

/// GET /api/users - every user with their full exercise list
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.find_all().await?;
    Ok(Json(users))
}

/// POST /api/users - create a user with an empty log.
///
/// A taken or missing username is reported like any other store failure.
pub async fn create(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<CreateUserRequest>,
) -> Result<Json<CreatedUser>, ApiError> {
    let username = body.username.map(Scalar::into_text).unwrap_or_default();
    let user = state.store.create(&username).await?;

    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(Json(CreatedUser {
        id: user.id.to_string(),
        username: user.username,
    }))
}
