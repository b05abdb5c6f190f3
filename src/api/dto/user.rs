//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::format_timestamp;
use crate::models::{NewUser, User};
use crate::utils::password::check_password_length;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for registering a new user.
///
/// Fields are optional at the serde level so a missing field reports its
/// "required" message instead of a deserialization error.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        required(message = "A first name is required!"),
        length(min = 1, message = "Please provide your first name!")
    )]
    #[schema(example = "Joe")]
    pub first_name: Option<String>,

    #[validate(
        required(message = "A last name is required!"),
        length(min = 1, message = "Please also provide your last name!")
    )]
    #[schema(example = "Smith")]
    pub last_name: Option<String>,

    #[validate(
        required(message = "An email address is required."),
        email(message = "Please provide a valid email.")
    )]
    #[schema(format = "email", example = "joe@smith.com")]
    pub email_address: Option<String>,

    #[validate(
        required(message = "A password is required!"),
        custom(function = "validate_password_length")
    )]
    #[schema(format = "password", min_length = 8, max_length = 20)]
    pub password: Option<String>,
}

fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    check_password_length(password)
        .map_err(|message| ValidationError::new("password_length").with_message(message.into()))
}

impl CreateUserRequest {
    /// Converts the validated request into a NewUser. The password is still
    /// plaintext here; `UserService` hashes it.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email_address: self.email_address.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// The authenticated user. Has no password field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

/// Owner summary embedded in course responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseOwner {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for CourseOwner {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}
