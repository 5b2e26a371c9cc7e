//! Repository for users.

use chrono::Utc;
use indexmap::IndexMap;
use scada_core::error::CoreError;
use scada_core::types::EntityId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::{CreateUser, UpdateUser, User, UserListParams};
use crate::paginate;

/// In-memory user collection, iterated in insertion order.
#[derive(Debug, Default)]
pub struct UserRepo {
    users: RwLock<IndexMap<EntityId, User>>,
}

impl UserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user.
    ///
    /// Email is checked before username; either duplicate is a validation
    /// failure.
    pub async fn create(&self, input: CreateUser) -> Result<User, CoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == input.email) {
            return Err(CoreError::Validation("Email already registered".into()));
        }
        if users.values().any(|u| u.username == input.username) {
            return Err(CoreError::Validation("Username already taken".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            username: input.username,
            full_name: input.full_name,
            is_active: input.is_active,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn list(&self, params: &UserListParams) -> Vec<User> {
        let users = self.users.read().await;
        paginate(
            users
                .values()
                .filter(|u| params.is_active.map_or(true, |active| u.is_active == active))
                .cloned(),
            params.skip,
            params.limit,
        )
    }

    pub async fn find_by_id(&self, id: EntityId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Merge the supplied fields into the user and bump `updated_at`.
    ///
    /// Returns `Ok(None)` if the user does not exist, and a conflict if the
    /// new email already belongs to another user.
    pub async fn update(&self, id: EntityId, input: &UpdateUser) -> Result<Option<User>, CoreError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &input.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(CoreError::Conflict(format!("Email {email} is already in use")));
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = &input.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &input.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(is_active) = input.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    /// Remove a user. Returns `true` if it existed.
    pub async fn delete(&self, id: EntityId) -> bool {
        self.users.write().await.shift_remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(email: &str, username: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            username: username.to_string(),
            full_name: None,
            is_active: true,
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = UserRepo::new();
        let user = repo.create(input("op@plant.example", "operator")).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found.username, "operator");
        assert_eq!(found.created_at, found.updated_at);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_before_username() {
        let repo = UserRepo::new();
        repo.create(input("op@plant.example", "operator")).await.unwrap();

        let result = repo.create(input("op@plant.example", "operator")).await;
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "Email already registered");

        let result = repo.create(input("other@plant.example", "operator")).await;
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "Username already taken");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn list_filters_on_active_flag() {
        let repo = UserRepo::new();
        repo.create(input("a@plant.example", "alpha")).await.unwrap();
        let mut inactive = input("b@plant.example", "bravo");
        inactive.is_active = false;
        repo.create(inactive).await.unwrap();

        let all = repo.list(&UserListParams::default()).await;
        assert_eq!(all.len(), 2);

        let params = UserListParams {
            is_active: Some(false),
            ..UserListParams::default()
        };
        let names: Vec<_> = repo.list(&params).await.into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["bravo"]);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let repo = UserRepo::new();
        let user = repo.create(input("a@plant.example", "alpha")).await.unwrap();

        let patch = UpdateUser {
            full_name: Some(Some("Alpha Shift".into())),
            is_active: Some(false),
            ..UpdateUser::default()
        };
        let updated = repo.update(user.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Alpha Shift"));
        assert!(!updated.is_active);
        assert_eq!(updated.email, "a@plant.example");
    }

    #[tokio::test]
    async fn update_with_null_clears_full_name() {
        let repo = UserRepo::new();
        let mut create = input("a@plant.example", "alpha");
        create.full_name = Some("Alpha Shift".into());
        let user = repo.create(create).await.unwrap();

        let patch = UpdateUser {
            full_name: Some(None),
            ..UpdateUser::default()
        };
        let updated = repo.update(user.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.full_name, None);
        assert_eq!(updated.username, "alpha");
    }

    #[tokio::test]
    async fn update_to_another_users_email_conflicts() {
        let repo = UserRepo::new();
        repo.create(input("a@plant.example", "alpha")).await.unwrap();
        let bravo = repo.create(input("b@plant.example", "bravo")).await.unwrap();

        let patch = UpdateUser {
            email: Some("a@plant.example".into()),
            ..UpdateUser::default()
        };
        assert_matches!(repo.update(bravo.id, &patch).await, Err(CoreError::Conflict(_)));

        // Re-submitting one's own email is fine.
        let patch = UpdateUser {
            email: Some("b@plant.example".into()),
            ..UpdateUser::default()
        };
        assert_matches!(repo.update(bravo.id, &patch).await, Ok(Some(_)));
    }

    #[tokio::test]
    async fn update_and_delete_missing_user() {
        let repo = UserRepo::new();
        let id = Uuid::new_v4();
        assert_matches!(repo.update(id, &UpdateUser::default()).await, Ok(None));
        assert!(!repo.delete(id).await);
    }
}
