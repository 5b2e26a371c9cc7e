//! User model and DTOs.

use scada_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::default_page_limit;

/// Full stored user.
///
/// Holds the password hash -- NEVER serialize this directly. Use
/// [`UserResponse`] for external-facing output.
#[derive(Debug, Clone)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for inserting a user. The password has already been hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub password_hash: String,
}

/// DTO for partially updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(email)]
    pub email: Option<String>,
    /// `Some(None)` clears the full name.
    #[serde(default, deserialize_with = "crate::nullable")]
    pub full_name: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Filters and paging for `GET /users`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    pub is_active: Option<bool>,
}

impl Default for UserListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_page_limit(),
            is_active: None,
        }
    }
}
