//! In-memory stores used by service and router tests.
//!
//! They mirror the integrity rules the PostgreSQL schema enforces: unique
//! email addresses and course owners that must exist.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff_diesel::{DateTime, ToDiesel};

use super::{CourseStore, HealthProbe, Repositories, UserStore};
use crate::error::AppError;
use crate::models::{Course, CourseWithOwner, NewCourse, NewUser, UpdateCourse, User};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    courses: BTreeMap<i32, Course>,
    next_user_id: i32,
    next_course_id: i32,
}

/// Shared tables backing both in-memory stores.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn now() -> DateTime {
    jiff::Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::UTC)
        .datetime()
        .to_diesel()
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builds a `Repositories` aggregate over a fresh store.
    pub(crate) fn repositories() -> Repositories {
        let store = Self::new();
        Repositories {
            users: Arc::new(store.clone()),
            courses: Arc::new(MemoryCourses(store.clone())),
            health: Arc::new(store),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn missing_owner(user_id: i32) -> AppError {
    AppError::validation(
        "user_id",
        format!("The referenced user_id '{}' does not exist.", user_id),
    )
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.lock();
        if tables
            .users
            .values()
            .any(|u| u.email_address == new_user.email_address)
        {
            return Err(AppError::Duplicate {
                entity: "users".to_string(),
                field: "email_address".to_string(),
                value: new_user.email_address,
            });
        }

        tables.next_user_id += 1;
        let timestamp = now();
        let user = User {
            id: tables.next_user_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email_address: new_user.email_address,
            password: new_user.password,
            created_at: timestamp,
            updated_at: timestamp,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email_address == email)
            .cloned())
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Course view over a [`MemoryStore`].
#[derive(Clone)]
pub(crate) struct MemoryCourses(pub(crate) MemoryStore);

#[async_trait]
impl CourseStore for MemoryCourses {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let mut tables = self.0.lock();
        if !tables.users.contains_key(&new_course.user_id) {
            return Err(missing_owner(new_course.user_id));
        }

        tables.next_course_id += 1;
        let timestamp = now();
        let course = Course {
            id: tables.next_course_id,
            title: new_course.title,
            description: new_course.description,
            estimated_time: new_course.estimated_time,
            materials_needed: new_course.materials_needed,
            user_id: new_course.user_id,
            created_at: timestamp,
            updated_at: timestamp,
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, course_id: i32) -> Result<Option<CourseWithOwner>, AppError> {
        let tables = self.0.lock();
        Ok(tables.courses.get(&course_id).and_then(|course| {
            tables
                .users
                .get(&course.user_id)
                .map(|owner| (course.clone(), owner.clone()))
        }))
    }

    async fn list_all(&self) -> Result<Vec<CourseWithOwner>, AppError> {
        let tables = self.0.lock();
        Ok(tables
            .courses
            .values()
            .filter_map(|course| {
                tables
                    .users
                    .get(&course.user_id)
                    .map(|owner| (course.clone(), owner.clone()))
            })
            .collect())
    }

    async fn update(
        &self,
        course_id: i32,
        changes: UpdateCourse,
    ) -> Result<Option<Course>, AppError> {
        let mut tables = self.0.lock();
        if !tables.courses.contains_key(&course_id) {
            return Ok(None);
        }
        if let Some(owner) = changes.user_id.filter(|id| !tables.users.contains_key(id)) {
            return Err(missing_owner(owner));
        }

        let Some(course) = tables.courses.get_mut(&course_id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            course.title = title;
        }
        if let Some(description) = changes.description {
            course.description = description;
        }
        if let Some(estimated_time) = changes.estimated_time {
            course.estimated_time = estimated_time;
        }
        if let Some(materials_needed) = changes.materials_needed {
            course.materials_needed = materials_needed;
        }
        if let Some(owner) = changes.user_id {
            course.user_id = owner;
        }
        course.updated_at = now();
        Ok(Some(course.clone()))
    }

    async fn delete(&self, course_id: i32) -> Result<usize, AppError> {
        Ok(self.0.lock().courses.remove(&course_id).map_or(0, |_| 1))
    }
}
