// ABOUTME: Recipe catalog service: search, favorites, history, own and family recipes, accounts
// ABOUTME: Adds viewer-relative flags on top of the resolver and validates creation input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::config::{CatalogBehaviorConfig, RandomRecipeSource};
use crate::database::{
    ActivityManager, Database, FamilyRecipeManager, FavoriteOutcome, RecipeManager, UserManager,
};
use crate::errors::{AppError, AppResult};
use crate::external::RecipeSource;
use crate::models::{
    FamilyRecipe, NewFamilyRecipe, NewRecipe, NewUser, RecipeDetail, RecipeId, RecipePreview,
    SearchQuery, UserId, UserProfile, UserRecipeSummary,
};
use crate::recipes::normalize::{normalize_external_preview, normalize_local_preview};
use crate::recipes::RecipeResolver;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// User-facing recipe catalog
#[derive(Clone)]
pub struct RecipeCatalog {
    recipes: RecipeManager,
    users: UserManager,
    activity: ActivityManager,
    family: FamilyRecipeManager,
    source: Arc<dyn RecipeSource>,
    resolver: RecipeResolver,
    config: CatalogBehaviorConfig,
}

impl RecipeCatalog {
    /// Wire the catalog over a database and an external source
    #[must_use]
    pub fn new(
        database: &Database,
        source: Arc<dyn RecipeSource>,
        config: CatalogBehaviorConfig,
    ) -> Self {
        let recipes = database.recipes();
        let resolver = RecipeResolver::new(Arc::new(recipes.clone()), Arc::clone(&source));

        Self {
            recipes,
            users: database.users(),
            activity: database.activity(),
            family: database.family_recipes(),
            source,
            resolver,
            config,
        }
    }

    /// Replace the user manager (e.g. one with a cheaper bcrypt cost)
    #[must_use]
    pub fn with_user_manager(mut self, users: UserManager) -> Self {
        self.users = users;
        self
    }

    /// The underlying resolver
    #[must_use]
    pub const fn resolver(&self) -> &RecipeResolver {
        &self.resolver
    }

    // ================================================================================================
    // Accounts
    // ================================================================================================

    /// Register a user
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for an empty username or password and
    /// `RESOURCE_ALREADY_EXISTS` for a taken username
    pub async fn register(&self, user: &NewUser) -> AppResult<UserId> {
        require_text("username", &user.username)?;
        require_text("password", &user.password)?;
        self.users.create_user(user).await
    }

    /// Check credentials
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` when the credentials do not match
    pub async fn login(&self, username: &str, password: &str) -> AppResult<UserId> {
        let user = self.users.authenticate(username, password).await?;
        info!(user.id = %user, "User logged in");
        Ok(user)
    }

    /// Public profile of a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn profile(&self, user: UserId) -> AppResult<UserProfile> {
        self.users
            .get_profile(user)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user}")))
    }

    // ================================================================================================
    // Browsing
    // ================================================================================================

    /// Search the external API and resolve the hits into previews
    ///
    /// A known viewer's result ids are stored as their last search. A zero
    /// limit means the configured default.
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for an empty query, or the external
    /// API's error
    pub async fn search(
        &self,
        viewer: Option<UserId>,
        query: &SearchQuery,
    ) -> AppResult<Vec<RecipePreview>> {
        require_text("query", &query.query)?;

        let mut query = query.clone();
        if query.limit == 0 {
            query.limit = self.config.default_search_limit;
        }

        let ids = self.source.search_recipe_ids(&query).await?;
        info!(query = %query.query, hits = ids.len(), "External recipe search");

        if let Some(user) = viewer {
            self.activity.store_last_search(user, &ids).await?;
        }

        Ok(self.resolver.resolve_previews(&ids).await)
    }

    /// Previews of the viewer's last search, `None` when they never searched
    ///
    /// # Errors
    ///
    /// Returns an error if the stored search cannot be read
    pub async fn last_search(&self, user: UserId) -> AppResult<Option<Vec<RecipePreview>>> {
        match self.activity.last_search(user).await? {
            Some(ids) => Ok(Some(self.resolver.resolve_previews(&ids).await)),
            None => Ok(None),
        }
    }

    /// Full detail of a recipe with viewer flags
    ///
    /// A known viewer's view is recorded, so `isWatched` is always true for
    /// them. Nothing is recorded when the recipe cannot be found.
    ///
    /// # Errors
    ///
    /// Returns an error if the local lookup or the view recording fails
    pub async fn view_recipe(
        &self,
        viewer: Option<UserId>,
        id: RecipeId,
    ) -> AppResult<Option<RecipeDetail>> {
        let Some(mut detail) = self.resolver.resolve_details(id).await? else {
            return Ok(None);
        };

        if let Some(user) = viewer {
            self.activity.mark_watched(user, id).await?;
            detail.is_watched = true;
            detail.is_favorite = self.activity.is_favorite(user, id).await?;
        }

        Ok(Some(detail))
    }

    /// The most recently viewed recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read
    pub async fn last_viewed(&self, user: UserId) -> AppResult<Vec<RecipePreview>> {
        let ids = self
            .activity
            .recent_watched_ids(user, self.config.last_viewed_limit)
            .await?;
        Ok(self.resolver.resolve_previews(&ids).await)
    }

    /// One random recipe from the configured source
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen source fails
    pub async fn random_recipe(&self) -> AppResult<Option<RecipePreview>> {
        match self.config.random_source {
            RandomRecipeSource::Local => Ok(self
                .recipes
                .random_recipe()
                .await?
                .as_ref()
                .map(normalize_local_preview)),
            RandomRecipeSource::External => Ok(self
                .source
                .random_recipes(1)
                .await?
                .first()
                .map(normalize_external_preview)),
        }
    }

    // ================================================================================================
    // Favorites
    // ================================================================================================

    /// Previews of the user's favorites in the order they were added
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be read
    pub async fn favorites(&self, user: UserId) -> AppResult<Vec<RecipePreview>> {
        let ids = self.activity.list_favorite_ids(user).await?;
        Ok(self.resolver.resolve_previews(&ids).await)
    }

    /// Save a favorite
    ///
    /// # Errors
    ///
    /// Returns an error if the favorite cannot be stored
    pub async fn add_favorite(&self, user: UserId, id: RecipeId) -> AppResult<FavoriteOutcome> {
        let outcome = self.activity.add_favorite(user, id).await?;
        if outcome == FavoriteOutcome::AlreadyPresent {
            warn!(user.id = %user, recipe.id = %id, "Recipe already in favorites");
        }
        Ok(outcome)
    }

    /// Drop a favorite; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the favorite cannot be removed
    pub async fn remove_favorite(&self, user: UserId, id: RecipeId) -> AppResult<bool> {
        self.activity.remove_favorite(user, id).await
    }

    // ================================================================================================
    // Own and family recipes
    // ================================================================================================

    /// Create a recipe in the local catalog
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when title, instructions, or every
    /// ingredient is missing
    pub async fn create_recipe(&self, user: UserId, recipe: NewRecipe) -> AppResult<RecipeId> {
        require_text("title", &recipe.title)?;
        require_text("instructions", &recipe.instructions)?;
        let recipe = NewRecipe {
            ingredients: clean_lines(recipe.ingredients),
            ..recipe
        };
        if recipe.ingredients.is_empty() {
            return Err(AppError::missing_field("ingredients"));
        }

        self.recipes.insert_recipe(user, &recipe).await
    }

    /// The user's own recipes with viewer flags, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup fails
    pub async fn my_recipes(&self, user: UserId) -> AppResult<Vec<UserRecipeSummary>> {
        let records = self.recipes.list_user_recipes(user).await?;
        let watched: HashSet<RecipeId> = self.activity.watched_ids(user).await?.into_iter().collect();
        let favorites: HashSet<RecipeId> = self
            .activity
            .list_favorite_ids(user)
            .await?
            .into_iter()
            .collect();

        Ok(records
            .iter()
            .map(|record| UserRecipeSummary {
                preview: normalize_local_preview(record),
                is_watched: watched.contains(&record.recipe_id),
                is_favorite: favorites.contains(&record.recipe_id),
            })
            .collect())
    }

    /// Every family recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn family_recipes(&self) -> AppResult<Vec<FamilyRecipe>> {
        self.family.list_all().await
    }

    /// Store a family recipe
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when title, ingredients, instructions,
    /// who made it, or when it is made is missing
    pub async fn create_family_recipe(
        &self,
        user: UserId,
        recipe: NewFamilyRecipe,
    ) -> AppResult<i64> {
        require_text("title", &recipe.title)?;
        require_text("instructions", &recipe.instructions)?;
        require_text("whoMadeIt", &recipe.who_made_it)?;
        require_text("whenMade", &recipe.when_made)?;
        let recipe = NewFamilyRecipe {
            ingredients: clean_lines(recipe.ingredients),
            ..recipe
        };
        if recipe.ingredients.is_empty() {
            return Err(AppError::missing_field("ingredients"));
        }

        self.family.create(user, &recipe).await
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::missing_field(field))
    } else {
        Ok(())
    }
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "Soup").is_ok());
        let error = require_text("title", "   ").unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert!(error.message.contains("title"));
    }

    #[test]
    fn test_clean_lines_drops_blank_entries() {
        let lines = clean_lines(vec![" 2 eggs ".into(), String::new(), "  ".into()]);
        assert_eq!(lines, vec!["2 eggs".to_owned()]);
    }
}
