//! Handlers for the user store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scada_core::types::EntityId;
use scada_store::models::user::{CreateUser, UpdateUser, UserListParams, UserResponse};
use scada_store::validate_input;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{not_found, AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    pub full_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub password: String,
}

fn default_active() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Validates the body and password strength, hashes the password, and
/// returns a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_input(&input)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create(CreateUser {
            email: input.email,
            username: input.username,
            full_name: input.full_name,
            is_active: input.is_active,
            password_hash: hashed,
        })
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    validate_input(&params)?;
    let users = state.users.list(&params).await;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .ok_or_else(|| not_found("User", id))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    validate_input(&input)?;

    let user = state
        .users
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    tracing::info!(user_id = %id, "User updated");

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if !state.users.delete(id).await {
        return Err(not_found("User", id));
    }
    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
