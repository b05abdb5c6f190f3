//! Course DTOs for API requests and responses.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{CourseOwner, format_timestamp};
use crate::models::{CourseWithOwner, NewCourse, UpdateCourse};

/// Request body for creating a course.
///
/// `userId` defaults to the authenticated user when omitted.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(
        required(message = "A title is required!"),
        length(min = 1, message = "Please provide a title!")
    )]
    #[schema(example = "Build a Basic Bookcase")]
    pub title: Option<String>,

    #[validate(
        required(message = "A description is required!"),
        length(min = 1, message = "Please provide a description!")
    )]
    pub description: Option<String>,

    #[schema(example = "12 hours")]
    pub estimated_time: Option<String>,

    #[schema(example = "* 1/2 x 3/4 inch parting strip")]
    pub materials_needed: Option<String>,

    pub user_id: Option<i32>,
}

impl CreateCourseRequest {
    /// Converts the validated request into a NewCourse owned by `user_id`
    /// unless the body names another owner.
    pub fn into_new_course(self, authenticated_user_id: i32) -> NewCourse {
        NewCourse {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
            user_id: self.user_id.unwrap_or(authenticated_user_id),
        }
    }
}

/// Request body for a partial course update. Absent fields are left as is;
/// `estimatedTime` and `materialsNeeded` are cleared by an explicit `null`.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Please provide a title!"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Please provide a description!"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    pub estimated_time: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    pub materials_needed: Option<Option<String>>,

    pub user_id: Option<i32>,
}

/// A present key becomes `Some`, even when its value is `null`.
fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateCourseRequest> for UpdateCourse {
    fn from(request: UpdateCourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            estimated_time: request.estimated_time,
            materials_needed: request.materials_needed,
            user_id: request.user_id,
        }
    }
}

/// A course together with the user who owns it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: String,
    pub user: CourseOwner,
}

impl From<CourseWithOwner> for CourseResponse {
    fn from((course, owner): CourseWithOwner) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
            created_at: format_timestamp(course.created_at),
            updated_at: format_timestamp(course.updated_at),
            user: owner.into(),
        }
    }
}
