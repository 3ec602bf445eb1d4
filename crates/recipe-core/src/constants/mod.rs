// ABOUTME: Application constants for the recipe catalog organized by domain
// ABOUTME: Normalization defaults, table names, external API defaults, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Hardcoded values shared by the persistence layer, the resolver, and
//! configuration loading.

/// Fallback values used when normalizing recipes
pub mod defaults {
    /// Preparation time when a source does not provide one
    pub const READY_IN_MINUTES: u32 = 30;

    /// Image used when a source does not provide one
    pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

    /// Popularity when a source does not provide one
    pub const POPULARITY: i64 = 0;

    /// Single step emitted when a recipe has no instruction text
    pub const NO_INSTRUCTIONS_STEP: &str = "No instructions available.";

    /// Number of results requested from the external search endpoint
    pub const SEARCH_LIMIT: u32 = 5;

    /// Number of recently viewed recipes returned to a user
    pub const LAST_VIEWED_LIMIT: u32 = 3;
}

/// Database table names
pub mod tables {
    /// Local recipes
    pub const RECIPES: &str = "recipes";
    /// Ingredient lines of local recipes
    pub const INGREDIENTS: &str = "ingredients";
    /// Registered users
    pub const USERS: &str = "users";
    /// Favorite recipes per user
    pub const USER_FAVORITES: &str = "user_favorites";
    /// Recipe view history per user
    pub const WATCHED_RECIPES: &str = "watched_recipes";
    /// Last external search per user
    pub const LAST_SEARCHES: &str = "user_last_searches";
    /// Family recipes
    pub const FAMILY_RECIPES: &str = "family_recipes";
}

/// External recipe API defaults
pub mod spoonacular {
    /// Service name used in errors and logs
    pub const SERVICE_NAME: &str = "Spoonacular API";

    /// Default base URL of the recipes endpoints
    pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names
pub mod env_vars {
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Run schema creation on startup
    pub const AUTO_MIGRATE: &str = "AUTO_MIGRATE";
    /// Pool size for file databases
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// External API key
    pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
    /// Legacy spelling of the external API key variable
    pub const SPOONACULAR_API_KEY_LEGACY: &str = "spooncular_apiKey";
    /// External API base URL
    pub const SPOONACULAR_BASE_URL: &str = "SPOONACULAR_BASE_URL";
    /// External API request timeout
    pub const SPOONACULAR_TIMEOUT_SECS: &str = "SPOONACULAR_TIMEOUT_SECS";
    /// External API connect timeout
    pub const SPOONACULAR_CONNECT_TIMEOUT_SECS: &str = "SPOONACULAR_CONNECT_TIMEOUT_SECS";
    /// `local` or `external`
    pub const RANDOM_RECIPE_SOURCE: &str = "RANDOM_RECIPE_SOURCE";
    /// Recently viewed list size
    pub const LAST_VIEWED_LIMIT: &str = "LAST_VIEWED_LIMIT";
    /// External search size
    pub const DEFAULT_SEARCH_LIMIT: &str = "DEFAULT_SEARCH_LIMIT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service names for structured logging
pub mod service_names {
    /// Name reported at startup
    pub const RECIPE_CATALOG: &str = "recipe-catalog";
}
