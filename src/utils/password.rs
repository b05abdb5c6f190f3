use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::{AppError, AppResult};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length, in characters
pub const MAX_PASSWORD_LENGTH: usize = 20;

pub const PASSWORD_EMPTY_MESSAGE: &str = "Please provide a password!";
pub const PASSWORD_LENGTH_MESSAGE: &str = "Your password should be between 8-20 characters!";

/// Checks the plaintext password against the length policy.
///
/// Returns the user-facing message of the first rule that fails.
pub fn check_password_length(password: &str) -> Result<(), &'static str> {
    let length = password.chars().count();
    if length == 0 {
        return Err(PASSWORD_EMPTY_MESSAGE);
    }
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(PASSWORD_LENGTH_MESSAGE);
    }
    Ok(())
}

/// Hash a password using Argon2id
///
/// # Arguments
/// * `password` - The plain text password to hash
///
/// # Returns
/// * `AppResult<String>` - The PHC-encoded hash (salt included)
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to hash password: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a hash
///
/// # Returns
/// * `AppResult<bool>` - True if password matches, false otherwise. A stored
///   hash that cannot be parsed is an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Stored password hash is malformed: {}", e),
    })?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
