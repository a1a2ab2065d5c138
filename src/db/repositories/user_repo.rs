//! User repository
//!
//! Emails are stored lowercased; usernames keep the case they were
//! registered with but must still be unique.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{constants::roles, error::AppResult, models::User};

/// Which unique account field a sign-up collides with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountClash {
    Username,
    Email,
}

pub struct UserRepository;

impl UserRepository {
    /// Insert a player account
    pub async fn create_player(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, display_name, role)
            VALUES ($1, LOWER($2), $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .bind(roles::PLAYER)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Existing account holding the username or (case-insensitively) the
    /// email a new sign-up wants. Username clashes are reported first.
    pub async fn find_clash(
        pool: &PgPool,
        username: &str,
        email: &str,
    ) -> AppResult<Option<AccountClash>> {
        let taken: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT username = $1
            FROM users
            WHERE username = $1 OR email = LOWER($2)
            ORDER BY (username = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(taken.map(|(by_username,)| {
            if by_username {
                AccountClash::Username
            } else {
                AccountClash::Email
            }
        }))
    }

    /// Login lookup: exact username or case-insensitive email
    pub async fn find_by_identifier(pool: &PgPool, identifier: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE username = $1 OR email = LOWER($1) LIMIT 1"#,
        )
        .bind(identifier.trim())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
