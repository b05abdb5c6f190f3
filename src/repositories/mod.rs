//! Repository layer for data access operations.
//!
//! Storage is reached through the [`UserStore`], [`CourseStore`] and
//! [`HealthProbe`] traits so services can run against PostgreSQL in
//! production and an in-memory store in tests.

mod course_repo;
mod health_probe;
#[cfg(test)]
pub(crate) mod memory;
mod user_repo;

use std::sync::Arc;

use async_trait::async_trait;

pub use course_repo::CourseRepository;
pub use health_probe::DatabaseProbe;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Course, CourseWithOwner, NewCourse, NewUser, UpdateCourse, User};

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. A taken email address yields `AppError::Duplicate`.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError>;

    /// Exact, case-sensitive lookup by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Persistence operations for courses.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Inserts a course. An unknown owner yields a `user_id` validation error.
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError>;

    /// Fetches a course together with its owner.
    async fn find_by_id(&self, course_id: i32) -> Result<Option<CourseWithOwner>, AppError>;

    /// All courses with their owners, ordered by ascending id.
    async fn list_all(&self) -> Result<Vec<CourseWithOwner>, AppError>;

    /// Applies the change set and bumps `updated_at`.
    ///
    /// Returns `None` when no course has the given id.
    async fn update(&self, course_id: i32, changes: UpdateCourse)
    -> Result<Option<Course>, AppError>;

    /// Deletes a course and returns the number of removed rows.
    async fn delete(&self, course_id: i32) -> Result<usize, AppError>;
}

/// Connectivity check used by the readiness endpoints.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Round-trips a trivial query against the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every store sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one pool.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            courses: Arc::new(CourseRepository::new(pool.clone())),
            health: Arc::new(DatabaseProbe::new(pool)),
        }
    }
}
