// ABOUTME: SQLite persistence for the recipe catalog with an explicitly owned connection pool
// ABOUTME: Creates the schema and hands out per-domain managers sharing the pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! # Database Management
//!
//! [`Database`] owns the `SqlitePool`. Every manager receives a clone of the
//! pool (an `Arc` internally), so nothing in the crate reaches for a global
//! connection.

/// Favorites, view history, and last search per user
pub mod activity;
/// Family recipes shared between all users
pub mod family_recipes;
/// Local recipe catalog and the `RecipeStore` seam used by the resolver
pub mod recipes;
/// User accounts
pub mod users;

pub use activity::{ActivityManager, FavoriteOutcome};
pub use family_recipes::FamilyRecipeManager;
pub use recipes::{RecipeManager, RecipeStore};
pub use users::UserManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Database handle owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool for the configured target, migrating when enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let db = Self::connect(&config.url, config.max_connections).await?;
        if config.auto_migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Open a connection pool without touching the schema
    ///
    /// In-memory databases are pinned to a single connection that never
    /// expires, since every `SQLite` connection gets its own memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be created or opened
    pub async fn connect(url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect("sqlite::memory:")
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
                    .create_if_missing(true)
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await?
            }
        };

        info!(database = %url, "Database connection pool opened");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create all tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_activity().await?;
        self.migrate_family_recipes().await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Local recipe operations
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Favorites, history, and last search operations
    #[must_use]
    pub fn activity(&self) -> ActivityManager {
        ActivityManager::new(self.pool.clone())
    }

    /// Family recipe operations
    #[must_use]
    pub fn family_recipes(&self) -> FamilyRecipeManager {
        FamilyRecipeManager::new(self.pool.clone())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        debug!("Migrating users table");
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                firstname TEXT NOT NULL,
                lastname TEXT NOT NULL,
                country TEXT NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                profile_pic TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        debug!("Migrating recipes and ingredients tables");
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER REFERENCES users(user_id) ON DELETE SET NULL,
                title TEXT NOT NULL,
                image TEXT,
                cook_time TEXT,
                likes INTEGER DEFAULT 0,
                is_vegan INTEGER NOT NULL DEFAULT 0,
                is_vegetarian INTEGER NOT NULL DEFAULT 0,
                is_gluten_free INTEGER NOT NULL DEFAULT 0,
                instructions TEXT,
                servings INTEGER,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                ingredient TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user_id ON recipes(user_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe_id ON ingredients(recipe_id)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn migrate_activity(&self) -> AppResult<()> {
        debug!("Migrating favorites, history, and last search tables");
        // recipe_id has no foreign key: external recipes can be favorited and watched too
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_favorites (
                user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS watched_recipes (
                user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL,
                viewed_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_last_searches (
                user_id INTEGER PRIMARY KEY REFERENCES users(user_id) ON DELETE CASCADE,
                recipe_ids TEXT NOT NULL,
                searched_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_watched_recipes_viewed_at ON watched_recipes(user_id, viewed_at)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn migrate_family_recipes(&self) -> AppResult<()> {
        debug!("Migrating family_recipes table");
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS family_recipes (
                recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                image TEXT,
                cook_time TEXT,
                is_vegan INTEGER NOT NULL DEFAULT 0,
                is_vegetarian INTEGER NOT NULL DEFAULT 0,
                is_gluten_free INTEGER NOT NULL DEFAULT 0,
                ingredients TEXT NOT NULL,
                instructions TEXT NOT NULL,
                servings INTEGER,
                who_made_it TEXT NOT NULL,
                when_made TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
