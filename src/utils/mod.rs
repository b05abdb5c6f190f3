//! Shared helpers: password hashing and validated request extraction.

pub mod password;
pub mod validate;
