//! HTTP Basic authentication middleware.
//!
//! Decodes `Authorization: Basic base64(email:password)`, checks the
//! credentials through `UserService` and stores the account in the request
//! extensions.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::dto::{UserResponse, format_timestamp};
use crate::error::AppError;
use crate::models::User;
use crate::services::ACCESS_DENIED;
use crate::state::AppState;

/// Extension type for the authenticated user.
///
/// Added to request extensions after successful authentication; extract it in
/// handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email_address: user.email_address.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Email/password pair carried by a Basic authorization header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// Parses the Basic credentials from request headers.
///
/// The scheme name is matched case-insensitively. The password may contain
/// colons; only the first one separates it from the email.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Basic authentication middleware.
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - Authorization header is missing or not Basic
/// - The encoded value is not `email:password`
/// - No user has the email address
/// - The password does not match
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(create_course))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(credentials) = parse_basic_credentials(request.headers()) else {
        debug!(path = %request.uri().path(), "Missing or malformed Basic credentials");
        return Err(AppError::unauthorized(ACCESS_DENIED));
    };

    let user = state
        .services
        .users
        .authenticate(&credentials.email, &credentials.password)
        .await?;

    request.extensions_mut().insert(AuthUser::from(&user));

    Ok(next.run(request).await)
}
