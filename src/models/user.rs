use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Deserialize;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
///
/// `password` always holds an Argon2 PHC string, never the plaintext.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewUser model for inserting new records
///
/// The service layer replaces `password` with its hash before the row is written.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}
