//! Profile viewing, profile updates, and password changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shelf_auth::{PasswordHasher, PasswordPolicy};
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::UserRepository;
use shelf_entity::user::User;

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
}

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password strength policy.
    policy: Arc<PasswordPolicy>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// Gets a user's full profile.
    pub async fn profile(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates profile fields.
    ///
    /// Email uniqueness is enforced by the database; a clash surfaces as
    /// a conflict from the repository rather than a pre-check race.
    pub async fn update_profile(&self, user_id: Uuid, update: UpdateProfile) -> AppResult<User> {
        if let Some(name) = update.name.as_deref() {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }
        if let Some(email) = update.email.as_deref() {
            if !email.contains('@') || !email.contains('.') {
                return Err(AppError::validation("Invalid email format"));
            }
        }

        let user = self
            .users
            .update_profile(user_id, update.name.as_deref(), update.email.as_deref())
            .await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    /// Changes a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.profile(user_id).await?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        if current_password == new_password {
            return Err(AppError::validation(
                "New password must differ from the current one",
            ));
        }
        self.policy.validate(new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Deletes an account. Rows owned by the user go with it via
    /// cascading foreign keys; blob cleanup happens before this call.
    pub async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        let deleted = self.users.delete(user_id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
