// ABOUTME: Database operations for locally stored recipes and their ingredient lines
// ABOUTME: Defines the RecipeStore lookup seam and its SQLite-backed RecipeManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::models::{LocalRecipeRecord, NewRecipe, RecipeId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Columns selected for every [`LocalRecipeRecord`]
const RECIPE_COLUMNS: &str = "recipe_id, user_id, title, image, cook_time, likes, \
     is_vegan, is_vegetarian, is_gluten_free, instructions, servings";

/// Most ids bound into one `IN (...)` lookup, well under SQLite's variable limit
pub const MAX_BOUND_IDS: usize = 500;

/// Read access to the local recipe catalog
///
/// The resolver only depends on this trait, so tests can swap in a store
/// that counts calls or fails on demand.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Fetch every stored recipe whose id is in `ids`, one query per [`MAX_BOUND_IDS`] ids
    ///
    /// Ids with no row are simply absent from the result; order is unspecified.
    async fn find_recipes_by_ids(&self, ids: &[RecipeId]) -> AppResult<Vec<LocalRecipeRecord>>;

    /// Fetch one stored recipe
    async fn find_recipe_by_id(&self, id: RecipeId) -> AppResult<Option<LocalRecipeRecord>>;

    /// Ingredient lines of a stored recipe in insertion order
    async fn list_ingredients(&self, id: RecipeId) -> AppResult<Vec<String>>;
}

/// Recipe database operations manager
#[derive(Clone)]
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a recipe and its ingredient lines in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; nothing is persisted in that case
    pub async fn insert_recipe(&self, author: UserId, recipe: &NewRecipe) -> AppResult<RecipeId> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (
                user_id, title, image, cook_time, likes, is_vegan, is_vegetarian,
                is_gluten_free, instructions, servings, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(author.as_i64())
        .bind(&recipe.title)
        .bind(&recipe.image)
        .bind(&recipe.cook_time)
        .bind(recipe.likes)
        .bind(i64::from(recipe.is_vegan))
        .bind(i64::from(recipe.is_vegetarian))
        .bind(i64::from(recipe.is_gluten_free))
        .bind(&recipe.instructions)
        .bind(recipe.servings.map(i64::from))
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        let recipe_id = RecipeId::new(result.last_insert_rowid());
        insert_ingredient_rows(&mut tx, recipe_id, &recipe.ingredients).await?;
        tx.commit().await?;

        info!(
            recipe.id = %recipe_id,
            user.id = %author,
            ingredients = recipe.ingredients.len(),
            "Created local recipe"
        );
        Ok(recipe_id)
    }

    /// Append ingredient lines to an existing recipe in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted in that case
    pub async fn insert_ingredients(&self, recipe: RecipeId, ingredients: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_ingredient_rows(&mut tx, recipe, ingredients).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Pick one stored recipe uniformly at random
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn random_recipe(&self) -> AppResult<Option<LocalRecipeRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY RANDOM() LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to pick random recipe: {e}")))?;

        row.map(|r| row_to_local_recipe(&r)).transpose()
    }

    /// Recipes authored by `user`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_user_recipes(&self, user: UserId) -> AppResult<Vec<LocalRecipeRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = ? ORDER BY recipe_id DESC"
        ))
        .bind(user.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list user recipes: {e}")))?;

        rows.iter().map(row_to_local_recipe).collect()
    }
}

#[async_trait]
impl RecipeStore for RecipeManager {
    async fn find_recipes_by_ids(&self, ids: &[RecipeId]) -> AppResult<Vec<LocalRecipeRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_BOUND_IDS) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql =
                format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE recipe_id IN ({placeholders})");

            let rows = chunk
                .iter()
                .fold(sqlx::query(&sql), |query, id| query.bind(id.as_i64()))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to fetch recipes: {e}")))?;

            for row in &rows {
                records.push(row_to_local_recipe(row)?);
            }
        }

        debug!(
            requested = ids.len(),
            found = records.len(),
            "Batched local recipe lookup"
        );
        Ok(records)
    }

    async fn find_recipe_by_id(&self, id: RecipeId) -> AppResult<Option<LocalRecipeRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE recipe_id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch recipe {id}: {e}")))?;

        row.map(|r| row_to_local_recipe(&r)).transpose()
    }

    async fn list_ingredients(&self, id: RecipeId) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT ingredient FROM ingredients WHERE recipe_id = ? ORDER BY position, ingredient_id",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch ingredients: {e}")))?;

        rows.iter()
            .map(|row| row.try_get("ingredient").map_err(AppError::from))
            .collect()
    }
}

/// Insert ingredient lines after the recipe's current last position
async fn insert_ingredient_rows(
    conn: &mut SqliteConnection,
    recipe: RecipeId,
    ingredients: &[String],
) -> AppResult<()> {
    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM ingredients WHERE recipe_id = ?",
    )
    .bind(recipe.as_i64())
    .fetch_one(&mut *conn)
    .await?;

    for (offset, ingredient) in ingredients.iter().enumerate() {
        sqlx::query("INSERT INTO ingredients (recipe_id, position, ingredient) VALUES (?, ?, ?)")
            .bind(recipe.as_i64())
            .bind(next_position + offset as i64)
            .bind(ingredient)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to store ingredient: {e}")))?;
    }
    Ok(())
}

/// Convert a database row to a [`LocalRecipeRecord`]
fn row_to_local_recipe(row: &SqliteRow) -> AppResult<LocalRecipeRecord> {
    let user_id: Option<i64> = row.try_get("user_id")?;

    Ok(LocalRecipeRecord {
        recipe_id: RecipeId::new(row.try_get("recipe_id")?),
        user_id: user_id.map(UserId::new),
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        cook_time: row.try_get("cook_time")?,
        likes: row.try_get("likes")?,
        is_vegan: row.try_get("is_vegan")?,
        is_vegetarian: row.try_get("is_vegetarian")?,
        is_gluten_free: row.try_get("is_gluten_free")?,
        instructions: row.try_get("instructions")?,
        servings: row.try_get("servings")?,
    })
}
