//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `course` - Course request/response DTOs
//! - `health` - Health check DTOs
//! - `error` - Common error response DTOs

mod course;
mod error;
mod health;
mod user;

pub use course::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{CourseOwner, CreateUserRequest, UserResponse};

use jiff::tz::TimeZone;

/// Formats a stored UTC timestamp as ISO 8601 with millisecond precision.
pub(crate) fn format_timestamp(value: jiff_diesel::DateTime) -> String {
    let value = value.to_jiff();
    match TimeZone::UTC.to_timestamp(value) {
        Ok(timestamp) => format!("{timestamp:.3}"),
        Err(_) => format!("{value:.3}Z"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff_diesel::ToDiesel;

    #[test]
    fn test_format_timestamp() {
        let value = date(2024, 3, 9).at(14, 5, 7, 120_000_000).to_diesel();
        assert_eq!(format_timestamp(value), "2024-03-09T14:05:07.120Z");
    }

    #[test]
    fn test_format_timestamp_whole_seconds() {
        let value = date(2024, 1, 1).at(0, 0, 0, 0).to_diesel();
        assert_eq!(format_timestamp(value), "2024-01-01T00:00:00.000Z");
    }
}
