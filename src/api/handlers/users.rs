//! User account handlers.
//!
//! `GET /api/users` returns the authenticated account; `POST /api/users`
//! registers a new one.

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, UserResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// GET /api/users - Current user
///
/// Returns the account that matches the supplied Basic credentials.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse)
    ),
    security(("basicAuth" = []))
)]
pub async fn get_current_user(Extension(auth_user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse::from(auth_user))
}

/// POST /api/users - Register a user
///
/// Responds 201 with `Location: /` and an empty body.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", headers(("Location" = String))),
        (status = 400, description = "Validation failed or email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .services
        .users
        .create_user(payload.into_new_user())
        .await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
