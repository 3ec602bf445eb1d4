// ABOUTME: User account database operations
// ABOUTME: Handles registration with bcrypt hashing, credential checks, and profile lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::auth::{default_bcrypt_cost, hash_password, verify_password};
use crate::errors::{AppError, AppResult};
use crate::models::{NewUser, UserId, UserProfile};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{info, warn};

/// User database operations manager
#[derive(Clone)]
pub struct UserManager {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserManager {
    /// Create a new user manager with the build profile's bcrypt cost
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }

    /// Override the bcrypt cost
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` when the username is taken, or a
    /// database error if the insert fails
    pub async fn create_user(&self, user: &NewUser) -> AppResult<UserId> {
        if self.user_exists(&user.username).await? {
            return Err(AppError::already_exists(format!(
                "Username '{}'",
                user.username
            )));
        }

        let password_hash = hash_password(&user.password, self.bcrypt_cost).await?;

        let result = sqlx::query(
            r"
            INSERT INTO users (
                username, firstname, lastname, country, email, password_hash, profile_pic, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&user.username)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.country)
        .bind(&user.email)
        .bind(&password_hash)
        .bind(&user.profile_pic)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        let user_id = UserId::new(result.last_insert_rowid());
        info!(user_id = %user_id, username = %user.username, "Registered user");
        Ok(user_id)
    }

    /// Check username and password
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for an unknown username or a wrong password
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<UserId> {
        let row = sqlx::query("SELECT user_id, password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?;

        let Some(row) = row else {
            warn!(username = %username, "Login attempt for unknown user");
            return Err(AppError::auth_invalid("Username or password incorrect"));
        };

        let password_hash: String = row.try_get("password_hash")?;
        if !verify_password(password, &password_hash).await {
            warn!(username = %username, "Login attempt with wrong password");
            return Err(AppError::auth_invalid("Username or password incorrect"));
        }

        Ok(UserId::new(row.try_get("user_id")?))
    }

    /// Public profile of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_profile(&self, user: UserId) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT username, firstname, lastname, email, country, profile_pic
            FROM users WHERE user_id = ?
            ",
        )
        .bind(user.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Whether a username is already registered
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn user_exists(&self, username: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check username: {e}")))?;
        Ok(count > 0)
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    Ok(UserProfile {
        username: row.try_get("username")?,
        firstname: row.try_get("firstname")?,
        lastname: row.try_get("lastname")?,
        email: row.try_get("email")?,
        country: row.try_get("country")?,
        profile_pic: row.try_get("profile_pic")?,
    })
}
