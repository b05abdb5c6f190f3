use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser, ValidationFieldError};

/// Utility for converting database errors to structured AppError variants.
///
/// Unique violations become `Duplicate`, other integrity violations become
/// field-level validation errors, everything else stays a `Database` error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_key_violation(
                    message,
                    info.details(),
                    info.table_name(),
                    info.constraint_name(),
                ) {
                    Some(violation) => AppError::Duplicate {
                        entity: violation.entity,
                        field: violation.field,
                        value: violation.value.unwrap_or_default(),
                    },
                    None => Self::unparsed(operation, "Unique constraint violation", message),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                match ConstraintParser::parse_key_violation(
                    message,
                    info.details(),
                    info.table_name(),
                    info.constraint_name(),
                ) {
                    Some(violation) => {
                        let reason = match violation.value {
                            Some(value) => {
                                format!("The referenced {} '{}' does not exist.", violation.field, value)
                            }
                            None => format!("The referenced {} does not exist.", violation.field),
                        };
                        AppError::ValidationErrors {
                            errors: vec![ValidationFieldError::new(violation.field, reason)],
                        }
                    }
                    None => Self::unparsed(operation, "Foreign key constraint violation", message),
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                match ConstraintParser::parse_not_null_violation(
                    message,
                    info.table_name(),
                    info.column_name(),
                ) {
                    Some((entity, field)) => AppError::validation(
                        field.clone(),
                        format!("{} is required for {}.", field, entity),
                    ),
                    None => Self::unparsed(operation, "Not null constraint violation", message),
                }
            }
            DatabaseErrorKind::CheckViolation => {
                match info
                    .constraint_name()
                    .and_then(ConstraintParser::parse_constraint_name)
                {
                    Some((entity, field)) => AppError::validation(
                        field.clone(),
                        format!("Invalid value for {} on {}.", field, entity),
                    ),
                    None => Self::unparsed(operation, "Check constraint violation", message),
                }
            }
            _ => Self::unparsed(operation, "Database error", message),
        }
    }

    fn unparsed(operation: &str, label: &str, message: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{}: {}", label, message)),
        }
    }
}
