// ABOUTME: Recipe lookup commands for recipe-cli
// ABOUTME: Handles preview, details, search, and random recipe operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use recipe_catalog::{
    errors::{AppError, AppResult},
    models::{RecipeId, SearchQuery, SearchSort},
    services::RecipeCatalog,
};
use tracing::{info, warn};

use crate::helpers::display::print_json;

type Result<T> = AppResult<T>;

/// Resolve previews for raw ids
pub async fn preview(catalog: &RecipeCatalog, ids: Vec<String>) -> Result<()> {
    let previews = catalog.resolver().resolve_previews_raw(&ids).await;
    info!(
        requested = ids.len(),
        resolved = previews.len(),
        "Resolved previews"
    );
    print_json(&previews)
}

/// Resolve the full detail of one recipe
pub async fn details(catalog: &RecipeCatalog, id: &str) -> Result<()> {
    let id = RecipeId::parse(id)
        .ok_or_else(|| AppError::invalid_input(format!("Malformed recipe id '{id}'")))?;

    let detail = catalog
        .view_recipe(None, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
    print_json(&detail)
}

/// Search the external API
pub async fn search(
    catalog: &RecipeCatalog,
    query: String,
    limit: Option<u32>,
    cuisine: Option<String>,
    diet: Option<String>,
    intolerances: Option<String>,
    sort: Option<String>,
) -> Result<()> {
    let sort = sort.as_deref().and_then(|raw| {
        let parsed = SearchSort::parse(raw);
        if parsed.is_none() {
            warn!(sort = raw, "Ignoring unsupported sort order");
        }
        parsed
    });

    let query = SearchQuery {
        query,
        // zero selects the configured default
        limit: limit.unwrap_or(0),
        cuisine,
        diet,
        intolerances,
        sort,
    };

    let previews = catalog.search(None, &query).await?;
    print_json(&previews)
}

/// Pick a random recipe
pub async fn random(catalog: &RecipeCatalog) -> Result<()> {
    match catalog.random_recipe().await? {
        Some(preview) => print_json(&preview),
        None => Err(AppError::not_found("Random recipe")),
    }
}
