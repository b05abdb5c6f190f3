//! Course service for business logic operations.

use std::sync::Arc;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Course, CourseWithOwner, NewCourse, UpdateCourse};
use crate::repositories::CourseStore;

/// Message returned when a PUT carries no recognized field.
pub const NO_UPDATED_CONTENT: &str = "No updated content found.";

/// Course service wrapping a [`CourseStore`].
#[derive(Clone)]
pub struct CourseService {
    repo: Arc<dyn CourseStore>,
}

impl CourseService {
    /// Creates a new CourseService with the given store.
    pub fn new(repo: Arc<dyn CourseStore>) -> Self {
        Self { repo }
    }

    /// Lists every course with its owner, ordered by id.
    pub async fn list_courses(&self) -> AppResult<Vec<CourseWithOwner>> {
        self.repo.list_all().await
    }

    /// Gets a course and its owner.
    ///
    /// # Returns
    /// The course if found, or `NotFound` error
    pub async fn get_course(&self, id: i32) -> AppResult<CourseWithOwner> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("course", "id", id))
    }

    /// Creates a course.
    ///
    /// # Errors
    /// - `AppError::ValidationErrors` - the owning user does not exist
    pub async fn create_course(&self, new_course: NewCourse) -> AppResult<Course> {
        let course = self.repo.create(new_course).await?;
        debug!(course_id = course.id, user_id = course.user_id, "Course created");
        Ok(course)
    }

    /// Applies a partial update to a course.
    ///
    /// # Errors
    /// - `AppError::BadRequest` - the change set is empty
    /// - `AppError::NotFound` - no course has this id
    pub async fn update_course(&self, id: i32, changes: UpdateCourse) -> AppResult<Course> {
        if changes.is_empty() {
            return Err(AppError::BadRequest {
                message: NO_UPDATED_CONTENT.to_string(),
            });
        }

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("course", "id", id))
    }

    /// Deletes a course.
    ///
    /// # Errors
    /// - `AppError::NotFound` - no course has this id
    pub async fn delete_course(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("course", "id", id));
        }
        debug!(course_id = id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repositories::UserStore;
    use crate::repositories::memory::{MemoryCourses, MemoryStore};

    async fn setup() -> (CourseService, i32) {
        let store = MemoryStore::new();
        let owner = store
            .create(NewUser {
                first_name: "Joe".to_string(),
                last_name: "Smith".to_string(),
                email_address: "joe@smith.com".to_string(),
                password: "hashed".to_string(),
            })
            .await
            .unwrap();
        (CourseService::new(Arc::new(MemoryCourses(store))), owner.id)
    }

    fn new_course(title: &str, user_id: i32) -> NewCourse {
        NewCourse {
            title: title.to_string(),
            description: "Learn things".to_string(),
            estimated_time: None,
            materials_needed: None,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_course() {
        let (service, owner_id) = setup().await;
        let course = service
            .create_course(new_course("Build a Basic Bookcase", owner_id))
            .await
            .unwrap();

        let (found, owner) = service.get_course(course.id).await.unwrap();
        assert_eq!(found.title, "Build a Basic Bookcase");
        assert_eq!(owner.id, owner_id);
    }

    #[tokio::test]
    async fn test_create_course_unknown_owner() {
        let (service, _) = setup().await;
        let error = service
            .create_course(new_course("Orphan", 42))
            .await
            .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => assert_eq!(errors[0].field, "user_id"),
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_courses_ordered_by_id() {
        let (service, owner_id) = setup().await;
        for title in ["First", "Second", "Third"] {
            service
                .create_course(new_course(title, owner_id))
                .await
                .unwrap();
        }

        let titles: Vec<String> = service
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|(course, _)| course.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_update_course_partial() {
        let (service, owner_id) = setup().await;
        let course = service
            .create_course(new_course("Old title", owner_id))
            .await
            .unwrap();

        let updated = service
            .update_course(
                course.id,
                UpdateCourse {
                    title: Some("New title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.description, "Learn things");
    }

    #[tokio::test]
    async fn test_update_course_empty_changes() {
        let (service, owner_id) = setup().await;
        let course = service
            .create_course(new_course("Title", owner_id))
            .await
            .unwrap();

        let error = service
            .update_course(course.id, UpdateCourse::default())
            .await
            .unwrap_err();
        assert_eq!(error.messages(), vec![NO_UPDATED_CONTENT.to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_course() {
        let (service, _) = setup().await;
        let error = service
            .update_course(
                7,
                UpdateCourse {
                    title: Some("Nope".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_course_twice() {
        let (service, owner_id) = setup().await;
        let course = service
            .create_course(new_course("Short lived", owner_id))
            .await
            .unwrap();

        service.delete_course(course.id).await.unwrap();
        let error = service.delete_course(course.id).await.unwrap_err();
        assert!(matches!(error, AppError::NotFound { .. }));
        assert!(matches!(
            service.get_course(course.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
