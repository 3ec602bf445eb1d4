// ABOUTME: Per-user recipe activity: favorites, view history, and the last external search
// ABOUTME: Recipe ids here may belong to either the local or the external namespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::models::{RecipeId, UserId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Result of adding a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteOutcome {
    /// The recipe was not a favorite before
    Added,
    /// The recipe was already a favorite; nothing changed
    AlreadyPresent,
}

/// Activity database operations manager
#[derive(Clone)]
pub struct ActivityManager {
    pool: SqlitePool,
}

impl ActivityManager {
    /// Create a new activity manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Save a recipe as a favorite
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_favorite(&self, user: UserId, recipe: RecipeId) -> AppResult<FavoriteOutcome> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_favorites (user_id, recipe_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(user.as_i64())
        .bind(recipe.as_i64())
        .bind(timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        if result.rows_affected() == 0 {
            Ok(FavoriteOutcome::AlreadyPresent)
        } else {
            debug!(user_id = %user, recipe_id = %recipe, "Added favorite");
            Ok(FavoriteOutcome::Added)
        }
    }

    /// Remove a favorite; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn remove_favorite(&self, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_favorites WHERE user_id = ? AND recipe_id = ?")
            .bind(user.as_i64())
            .bind(recipe.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Favorite recipe ids in the order they were added
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_favorite_ids(&self, user: UserId) -> AppResult<Vec<RecipeId>> {
        self.fetch_ids(
            "SELECT recipe_id FROM user_favorites WHERE user_id = ? ORDER BY rowid",
            user,
            None,
        )
        .await
    }

    /// Whether a recipe is one of the user's favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_favorite(&self, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        self.exists(
            "SELECT COUNT(*) FROM user_favorites WHERE user_id = ? AND recipe_id = ?",
            user,
            recipe,
        )
        .await
    }

    /// Record that the user opened a recipe now
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails
    pub async fn mark_watched(&self, user: UserId, recipe: RecipeId) -> AppResult<()> {
        self.mark_watched_at(user, recipe, Utc::now()).await
    }

    /// Record that the user opened a recipe at `viewed_at`
    ///
    /// A repeat view only moves the timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails
    pub async fn mark_watched_at(
        &self,
        user: UserId,
        recipe: RecipeId,
        viewed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO watched_recipes (user_id, recipe_id, viewed_at) VALUES (?, ?, ?)
            ON CONFLICT (user_id, recipe_id) DO UPDATE SET viewed_at = excluded.viewed_at
            ",
        )
        .bind(user.as_i64())
        .bind(recipe.as_i64())
        .bind(timestamp(viewed_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record recipe view: {e}")))?;

        Ok(())
    }

    /// Most recently viewed recipe ids, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_watched_ids(&self, user: UserId, limit: u32) -> AppResult<Vec<RecipeId>> {
        self.fetch_ids(
            "SELECT recipe_id FROM watched_recipes WHERE user_id = ? ORDER BY viewed_at DESC, rowid DESC LIMIT ?",
            user,
            Some(limit),
        )
        .await
    }

    /// Every recipe id the user has viewed
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn watched_ids(&self, user: UserId) -> AppResult<Vec<RecipeId>> {
        self.fetch_ids(
            "SELECT recipe_id FROM watched_recipes WHERE user_id = ? ORDER BY viewed_at DESC",
            user,
            None,
        )
        .await
    }

    /// Whether the user has viewed a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_watched(&self, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        self.exists(
            "SELECT COUNT(*) FROM watched_recipes WHERE user_id = ? AND recipe_id = ?",
            user,
            recipe,
        )
        .await
    }

    /// Replace the user's last search result ids
    ///
    /// # Errors
    ///
    /// Returns an error if the ids cannot be encoded or the upsert fails
    pub async fn store_last_search(&self, user: UserId, ids: &[RecipeId]) -> AppResult<()> {
        let encoded = serde_json::to_string(ids)?;

        sqlx::query(
            r"
            INSERT INTO user_last_searches (user_id, recipe_ids, searched_at) VALUES (?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                recipe_ids = excluded.recipe_ids,
                searched_at = excluded.searched_at
            ",
        )
        .bind(user.as_i64())
        .bind(&encoded)
        .bind(timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store last search: {e}")))?;

        Ok(())
    }

    /// The user's last search result ids, `None` when the user never searched
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored ids are corrupt
    pub async fn last_search(&self, user: UserId) -> AppResult<Option<Vec<RecipeId>>> {
        let encoded: Option<String> =
            sqlx::query_scalar("SELECT recipe_ids FROM user_last_searches WHERE user_id = ?")
                .bind(user.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to load last search: {e}")))?;

        encoded
            .map(|json| serde_json::from_str(&json).map_err(AppError::from))
            .transpose()
    }

    async fn fetch_ids(
        &self,
        sql: &str,
        user: UserId,
        limit: Option<u32>,
    ) -> AppResult<Vec<RecipeId>> {
        let mut query = sqlx::query(sql).bind(user.as_i64());
        if let Some(limit) = limit {
            query = query.bind(i64::from(limit));
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipe ids: {e}")))?;

        rows.iter()
            .map(|row| {
                row.try_get::<i64, _>("recipe_id")
                    .map(RecipeId::new)
                    .map_err(AppError::from)
            })
            .collect()
    }

    async fn exists(&self, sql: &str, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(sql)
            .bind(user.as_i64())
            .bind(recipe.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe activity: {e}")))?;
        Ok(count > 0)
    }
}

/// Fixed-width UTC timestamp that sorts lexicographically
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
