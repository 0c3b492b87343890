use chrono::{DateTime, Utc};
use lib_auth::UserRole;
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(email: String, full_name: String, password_hash: String, role: UserRole) -> Self {
        Self {
            email,
            full_name,
            password_hash,
            role,
        }
    }
}
