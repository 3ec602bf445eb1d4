// ABOUTME: External recipe API clients and the RecipeSource seam used by the resolver
// ABOUTME: The Spoonacular-compatible client is the production implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! External API Clients

/// Spoonacular-compatible recipe API client
pub mod spoonacular_client;

pub use spoonacular_client::SpoonacularClient;

use crate::errors::AppResult;
use crate::models::{ExternalRecipePayload, RecipeId, SearchQuery};
use async_trait::async_trait;

/// Third-party recipe data
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Full information for one recipe
    async fn fetch_recipe_by_id(&self, id: RecipeId) -> AppResult<ExternalRecipePayload>;

    /// Ids of the recipes matching a search, in the API's ranking order
    async fn search_recipe_ids(&self, query: &SearchQuery) -> AppResult<Vec<RecipeId>>;

    /// `count` random recipes
    async fn random_recipes(&self, count: u32) -> AppResult<Vec<ExternalRecipePayload>>;
}
