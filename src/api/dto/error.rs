//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response format.
///
/// `errors` lists every user-facing message for 400 responses and is
/// omitted otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "VALIDATION_ERROR",
    "message": "Validation failed",
    "errors": ["A title is required!"]
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Attaches the list of user-facing messages.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_omitted_when_empty() {
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert!(json.get("errors").is_none());

        let json = serde_json::to_value(
            ErrorResponse::new("VALIDATION_ERROR", "Validation failed")
                .with_errors(vec!["A title is required!".to_string()]),
        )
        .unwrap();
        assert_eq!(json["errors"][0], "A title is required!");
    }
}
