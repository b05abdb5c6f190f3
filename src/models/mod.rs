mod course;
mod user;

pub use course::{Course, CourseWithOwner, NewCourse, UpdateCourse};
pub use user::{NewUser, User};
