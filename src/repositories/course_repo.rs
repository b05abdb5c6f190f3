//! Course repository for async database operations.
//!
//! Reads always join the owning user so handlers can embed it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::CourseStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, DatabaseErrorConverter};
use crate::models::{Course, CourseWithOwner, NewCourse, UpdateCourse, User};
use crate::schema::{courses, users};

#[derive(Clone)]
pub struct CourseRepository {
    pool: AsyncDbPool,
}

impl CourseRepository {
    /// Creates a new CourseRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(courses::table)
            .values(&new_course)
            .returning(Course::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert course"))
    }

    async fn find_by_id(&self, course_id: i32) -> Result<Option<CourseWithOwner>, AppError> {
        let mut conn = self.pool.get().await?;

        courses::table
            .inner_join(users::table)
            .filter(courses::id.eq(course_id))
            .select((Course::as_select(), User::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<CourseWithOwner>, AppError> {
        let mut conn = self.pool.get().await?;

        courses::table
            .inner_join(users::table)
            .order(courses::id.asc())
            .select((Course::as_select(), User::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(
        &self,
        course_id: i32,
        changes: UpdateCourse,
    ) -> Result<Option<Course>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(courses::table.filter(courses::id.eq(course_id)))
            .set((&changes, courses::updated_at.eq(diesel::dsl::now)))
            .returning(Course::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update course"))
    }

    async fn delete(&self, course_id: i32) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(courses::table.filter(courses::id.eq(course_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
