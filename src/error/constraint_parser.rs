use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the violated key in the DETAIL line
/// (`Key (email_address)=(a@b.co) already exists.`) and names constraints
/// `{table}_{column}_{suffix}`. Both sources are combined here.
pub struct ConstraintParser;

/// A constraint violation broken down into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub entity: String,
    pub field: String,
    pub value: Option<String>,
}

/// Compiled regex patterns for constraint parsing, cached for performance
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        // The patterns are literals; a failure here is a programming error.
        Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value regex"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column regex"),
            table_name: Regex::new(r#"table "([^"]+)""#).expect("valid table regex"),
            relation_name: Regex::new(r#"relation "([^"]+)""#).expect("valid relation regex"),
        }
    }
}

/// Global regex patterns cache
static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Constraint name suffixes generated by PostgreSQL
const CONSTRAINT_SUFFIXES: &[&str] = &["_key", "_fkey", "_check", "_idx", "_pkey"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique or foreign key violation.
    ///
    /// Prefers the table reported by the driver, then the constraint name,
    /// then the message text. The field comes from the `Key (..)` detail when
    /// present.
    ///
    /// # Examples
    /// ```
    /// use course_api::error::ConstraintParser;
    ///
    /// let v = ConstraintParser::parse_key_violation(
    ///     "duplicate key value violates unique constraint \"users_email_address_key\"",
    ///     Some("Key (email_address)=(a@b.co) already exists."),
    ///     None,
    ///     Some("users_email_address_key"),
    /// )
    /// .unwrap();
    /// assert_eq!(v.entity, "users");
    /// assert_eq!(v.field, "email_address");
    /// assert_eq!(v.value.as_deref(), Some("a@b.co"));
    /// ```
    pub fn parse_key_violation(
        message: &str,
        details: Option<&str>,
        table_name: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));
        let from_constraint = constraint_name.and_then(Self::parse_constraint_name);

        let field = key_value
            .as_ref()
            .map(|(field, _)| field.clone())
            .or_else(|| from_constraint.as_ref().map(|(_, field)| field.clone()))?;

        let entity = table_name
            .map(str::to_string)
            .or_else(|| from_constraint.map(|(entity, _)| entity))
            .or_else(|| Self::extract_table(message))
            .unwrap_or_else(|| "resource".to_string());

        Some(ConstraintViolation {
            entity,
            field,
            value: key_value.map(|(_, value)| value),
        })
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        table_name: Option<&str>,
        column_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = column_name
            .map(str::to_string)
            .or_else(|| Self::extract_column(message))?;
        let entity = table_name
            .map(str::to_string)
            .or_else(|| Self::extract_table(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits `{table}_{column}_{suffix}` into (table, column).
    ///
    /// Only the first underscore separates the table, so multi-word columns
    /// such as `user_id` survive: `courses_user_id_fkey` -> ("courses", "user_id").
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` fragment.
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(text).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    fn extract_column(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_table(message: &str) -> Option<String> {
        let patterns = Self::patterns();
        patterns
            .table_name
            .captures(message)
            .or_else(|| patterns.relation_name.captures(message))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_unique_violation_from_details() {
        let violation = ConstraintParser::parse_key_violation(
            "duplicate key value violates unique constraint \"users_email_address_key\"",
            Some("Key (email_address)=(joe@smith.com) already exists."),
            Some("users"),
            Some("users_email_address_key"),
        )
        .unwrap();

        assert_eq!(violation.entity, "users");
        assert_eq!(violation.field, "email_address");
        assert_eq!(violation.value.as_deref(), Some("joe@smith.com"));
    }

    #[test]
    fn test_parse_foreign_key_violation_keeps_multi_word_field() {
        let violation = ConstraintParser::parse_key_violation(
            "insert or update on table \"courses\" violates foreign key constraint \"courses_user_id_fkey\"",
            Some("Key (user_id)=(999) is not present in table \"users\"."),
            None,
            Some("courses_user_id_fkey"),
        )
        .unwrap();

        assert_eq!(violation.entity, "courses");
        assert_eq!(violation.field, "user_id");
        assert_eq!(violation.value.as_deref(), Some("999"));
    }

    #[test]
    fn test_parse_key_violation_from_constraint_name_only() {
        let violation =
            ConstraintParser::parse_key_violation("violation", None, None, Some("courses_user_id_fkey"))
                .unwrap();
        assert_eq!(violation.entity, "courses");
        assert_eq!(violation.field, "user_id");
        assert!(violation.value.is_none());
    }

    #[test]
    fn test_parse_key_violation_without_information() {
        assert!(ConstraintParser::parse_key_violation("something broke", None, None, None).is_none());
    }

    #[test]
    fn test_parse_not_null_violation() {
        let parsed = ConstraintParser::parse_not_null_violation(
            "null value in column \"title\" of relation \"courses\" violates not-null constraint",
            None,
            None,
        );
        assert_eq!(parsed, Some(("courses".to_string(), "title".to_string())));
    }

    #[test]
    fn test_parse_not_null_violation_prefers_driver_fields() {
        let parsed = ConstraintParser::parse_not_null_violation("irrelevant", Some("users"), Some("last_name"));
        assert_eq!(parsed, Some(("users".to_string(), "last_name".to_string())));
    }

    #[test]
    fn test_parse_constraint_name_rejects_unknown_suffix() {
        assert!(ConstraintParser::parse_constraint_name("users_email").is_none());
        assert!(ConstraintParser::parse_constraint_name("_key").is_none());
    }

    proptest! {
        #[test]
        fn prop_constraint_name_round_trip(
            table in "[a-z]{1,12}",
            column in "[a-z]{1,8}(_[a-z]{1,8})?",
            suffix in prop_oneof![Just("_key"), Just("_fkey"), Just("_check")],
        ) {
            let name = format!("{}_{}{}", table, column, suffix);
            let parsed = ConstraintParser::parse_constraint_name(&name);
            prop_assert_eq!(parsed, Some((table, column)));
        }
    }
}
