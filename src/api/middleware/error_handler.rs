//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.
//! Server-side failures are logged with their source chain and reported to
//! the client with a sanitized message.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Realm announced in the `WWW-Authenticate` challenge.
pub const AUTH_REALM: &str = "Basic realm=\"course-api\"";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            log_server_error(&self);
        }

        let status = error_to_status_code(&self);
        let body = ErrorResponse::new(error_to_code(&self), public_message(&self))
            .with_errors(self.messages());

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_REALM),
            );
        }
        response
    }
}

fn log_server_error(error: &AppError) {
    let mut chain = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    error!(error = %error, causes = ?chain, "Request failed with server error");
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn public_message(error: &AppError) -> String {
    match error {
        AppError::ValidationErrors { .. } => "Validation failed".to_string(),
        AppError::Duplicate { .. } => "Duplicate entry".to_string(),
        AppError::BadRequest { message } | AppError::Unauthorized { message } => message.clone(),
        AppError::NotFound { entity, .. } => format!("The requested {} was not found", entity),
        AppError::Database { .. } | AppError::Internal { .. } => {
            "An internal error occurred".to_string()
        }
        AppError::ConnectionPool { .. } => "Database connection unavailable".to_string(),
    }
}
