//! User service for business logic operations.
//!
//! Owns the password policy and credential checks; the store only ever sees
//! hashed passwords.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserStore;
use crate::utils::password::{check_password_length, hash_password, verify_password};

/// Message returned for every failed authentication attempt.
pub const ACCESS_DENIED: &str = "Access denied";

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new UserService with the given store.
    pub fn new(repo: Arc<dyn UserStore>) -> Self {
        Self { repo }
    }

    /// Registers a new user.
    ///
    /// The plaintext password is length-checked, then replaced by its Argon2
    /// hash before it reaches the store.
    ///
    /// # Errors
    /// - `AppError::ValidationErrors` - password outside 8..=20 characters
    /// - `AppError::Duplicate` - email address already registered
    pub async fn create_user(&self, mut new_user: NewUser) -> AppResult<User> {
        check_password_length(&new_user.password)
            .map_err(|message| AppError::validation("password", message))?;
        let password = std::mem::take(&mut new_user.password);
        new_user.password = run_blocking(move || hash_password(&password)).await?;

        let user = self.repo.create(new_user).await?;
        debug!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Gets a user by their ID.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    /// Checks a pair of Basic credentials.
    ///
    /// Unknown email and wrong password both yield the same `Unauthorized`
    /// error; the distinction is only logged.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            warn!(email_address = %email, "User not found for username");
            return Err(AppError::unauthorized(ACCESS_DENIED));
        };

        let password = password.to_string();
        let password_hash = user.password.clone();
        if !run_blocking(move || verify_password(&password, &password_hash)).await? {
            warn!(email_address = %email, "Authentication failure for username");
            return Err(AppError::unauthorized(ACCESS_DENIED));
        }

        debug!(user_id = user.id, "Authentication successful");
        Ok(user)
    }
}

/// Runs Argon2 work on the blocking thread pool so request handling is not
/// stalled by it.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}
