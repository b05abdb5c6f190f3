use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Deserialize;

use super::User;

/// Course model for reading from database
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::schema::courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewCourse model for inserting new records
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
}

/// UpdateCourse model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
///
/// `None` leaves the column untouched. For the nullable columns `Some(None)`
/// writes NULL.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::courses)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
    pub user_id: Option<i32>,
}

impl UpdateCourse {
    /// Returns true when no column would be touched by this changeset.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.estimated_time.is_none()
            && self.materials_needed.is_none()
            && self.user_id.is_none()
    }
}

/// A course joined with the user that owns it.
pub type CourseWithOwner = (Course, User);
