//! # User Repository
//!
//! Provides database access layer for user records, keyed by email.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, ensure_schema, UserForCreate, UserRepository};
//! # use lib_auth::UserRole;
//! # async fn example() -> Result<(), sqlx::Error> {
//! let pool = create_pool("sqlite::memory:").await?;
//! ensure_schema(&pool).await?;
//!
//! let user = UserRepository::create(&pool, &UserForCreate::new(
//!     "alice@example.com".to_string(),
//!     "Alice".to_string(),
//!     "$argon2id$...".to_string(),
//!     UserRole::Client,
//! )).await?;
//!
//! let found = UserRepository::find_by_email(&pool, "alice@example.com").await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address (exact, case-sensitive match).
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new, active user.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the email already exists (PRIMARY KEY violation)
    /// or the database connection fails.
    pub async fn create(pool: &DbPool, user_data: &UserForCreate) -> Result<User, sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (email, full_name, password_hash, role, is_active) VALUES (?, ?, ?, ?, 1)",
        )
        .bind(&user_data.email)
        .bind(&user_data.full_name)
        .bind(&user_data.password_hash)
        .bind(user_data.role.as_str())
        .execute(pool)
        .await?;

        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(&user_data.email)
            .fetch_one(pool)
            .await
    }

    /// Set the active flag of a user.
    ///
    /// Returns whether a user with `email` exists. Setting the flag to its
    /// current value still counts as a match.
    pub async fn set_active(pool: &DbPool, email: &str, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = ? WHERE email = ?")
            .bind(is_active)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List every user, oldest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users ORDER BY created_at, email")
            .fetch_all(pool)
            .await
    }
}
