// ABOUTME: Database operations for family recipes shared across all users
// ABOUTME: Stores ingredient lines as one comma-joined text column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::models::{FamilyRecipe, NewFamilyRecipe, UserId};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

/// Family recipe database operations manager
#[derive(Clone)]
pub struct FamilyRecipeManager {
    pool: SqlitePool,
}

impl FamilyRecipeManager {
    /// Create a new family recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a family recipe authored by `author`
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(&self, author: UserId, recipe: &NewFamilyRecipe) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO family_recipes (
                user_id, title, image, cook_time, is_vegan, is_vegetarian, is_gluten_free,
                ingredients, instructions, servings, who_made_it, when_made, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(author.as_i64())
        .bind(&recipe.title)
        .bind(&recipe.image)
        .bind(&recipe.cook_time)
        .bind(i64::from(recipe.is_vegan))
        .bind(i64::from(recipe.is_vegetarian))
        .bind(i64::from(recipe.is_gluten_free))
        .bind(recipe.ingredients.join(", "))
        .bind(&recipe.instructions)
        .bind(recipe.servings.map(i64::from))
        .bind(&recipe.who_made_it)
        .bind(&recipe.when_made)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create family recipe: {e}")))?;

        let id = result.last_insert_rowid();
        info!(family_recipe_id = id, user_id = %author, "Created family recipe");
        Ok(id)
    }

    /// Every family recipe, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_all(&self) -> AppResult<Vec<FamilyRecipe>> {
        let rows = sqlx::query(
            r"
            SELECT recipe_id, title, image, cook_time, is_vegan, is_vegetarian, is_gluten_free,
                   ingredients, instructions, servings, who_made_it, when_made
            FROM family_recipes
            ORDER BY recipe_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list family recipes: {e}")))?;

        rows.iter().map(row_to_family_recipe).collect()
    }
}

fn row_to_family_recipe(row: &SqliteRow) -> AppResult<FamilyRecipe> {
    let is_vegan: i64 = row.try_get("is_vegan")?;
    let is_vegetarian: i64 = row.try_get("is_vegetarian")?;
    let is_gluten_free: i64 = row.try_get("is_gluten_free")?;

    Ok(FamilyRecipe {
        id: row.try_get("recipe_id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        cook_time: row.try_get("cook_time")?,
        is_vegan: is_vegan == 1,
        is_vegetarian: is_vegetarian == 1,
        is_gluten_free: is_gluten_free == 1,
        ingredients: row.try_get("ingredients")?,
        instructions: row.try_get("instructions")?,
        servings: row.try_get("servings")?,
        who_made_it: row.try_get("who_made_it")?,
        when_made: row.try_get("when_made")?,
    })
}
