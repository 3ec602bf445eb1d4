// ABOUTME: Recipe domain types: identifiers, stored rows, external payloads, and normalized shapes
// ABOUTME: RecipePreview and RecipeDetail are the single output shapes regardless of data source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Recipe models
//!
//! Two sources feed the catalog: rows of the local `recipes` table
//! ([`LocalRecipeRecord`], booleans stored as 0/1 integers) and payloads of
//! the external recipe API ([`ExternalRecipePayload`], native booleans).
//! Both are normalized into [`RecipePreview`] and [`RecipeDetail`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::UserId;
use crate::constants::defaults;

/// Recipe identifier shared by the local and external namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value, used for query binding
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Parse a textual identifier
    ///
    /// Accepts a trimmed base-10 integer greater than zero. Anything else is
    /// a malformed identifier and yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
    }
}

impl From<i64> for RecipeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the local `recipes` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRecipeRecord {
    /// Primary key
    pub recipe_id: RecipeId,
    /// Author, when the recipe was created by a user
    pub user_id: Option<UserId>,
    /// Recipe title
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text cooking time such as `"45 minutes"`
    pub cook_time: Option<String>,
    /// Like counter
    pub likes: Option<i64>,
    /// 1 when vegan, 0 otherwise
    pub is_vegan: i64,
    /// 1 when vegetarian, 0 otherwise
    pub is_vegetarian: i64,
    /// 1 when gluten free, 0 otherwise
    pub is_gluten_free: i64,
    /// Newline-separated instructions
    pub instructions: Option<String>,
    /// Number of servings
    pub servings: Option<i64>,
}

/// Recipe information returned by the external recipe API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRecipePayload {
    /// External identifier
    pub id: i64,
    /// Recipe title
    #[serde(default)]
    pub title: String,
    /// Total preparation time in minutes
    pub ready_in_minutes: Option<u32>,
    /// Image URL
    pub image: Option<String>,
    /// Aggregated like count
    pub aggregate_likes: Option<i64>,
    /// Vegan flag
    #[serde(default)]
    pub vegan: bool,
    /// Vegetarian flag
    #[serde(default)]
    pub vegetarian: bool,
    /// Gluten-free flag
    #[serde(default)]
    pub gluten_free: bool,
    /// Raw instruction text (may contain HTML)
    pub instructions: Option<String>,
    /// Number of servings
    pub servings: Option<u32>,
    /// Ingredient list
    pub extended_ingredients: Option<Vec<ExtendedIngredient>>,
    /// Structured instruction sections
    pub analyzed_instructions: Option<Vec<AnalyzedInstruction>>,
}

/// Ingredient entry of an external payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    /// Ingredient name, e.g. `"flour"`
    pub name: Option<String>,
    /// Original recipe line, e.g. `"2 cups flour"`
    pub original: Option<String>,
}

impl ExtendedIngredient {
    /// Text shown to users: the original line, else the bare name
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.original
            .as_deref()
            .or(self.name.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Instruction section of an external payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedInstruction {
    /// Section name (often empty)
    #[serde(default)]
    pub name: String,
    /// Steps of this section
    #[serde(default)]
    pub steps: Vec<AnalyzedStep>,
}

/// Single structured step of an external payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedStep {
    /// Step number within its section
    #[serde(default)]
    pub number: u32,
    /// Step text
    #[serde(default)]
    pub step: String,
}

/// Normalized summary used in list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePreview {
    /// Recipe identifier
    pub id: RecipeId,
    /// Recipe title
    pub title: String,
    /// Preparation time in minutes
    pub ready_in_minutes: u32,
    /// Image URL (placeholder when the source has none)
    pub image: String,
    /// Like count
    pub popularity: i64,
    /// Vegan flag
    pub vegan: bool,
    /// Vegetarian flag
    pub vegetarian: bool,
    /// Gluten-free flag
    pub gluten_free: bool,
    /// Raw instruction text
    pub instructions: Option<String>,
}

/// One numbered instruction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// 1-based position
    pub number: u32,
    /// Step text
    pub step: String,
}

/// Full recipe view with ingredients, steps, and viewer-relative flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    /// Preview fields
    #[serde(flatten)]
    pub preview: RecipePreview,
    /// Number of servings
    pub servings: Option<u32>,
    /// Ingredient lines
    pub ingredients: Vec<String>,
    /// Numbered instruction steps
    pub steps: Vec<InstructionStep>,
    /// Viewer saved this recipe as a favorite
    pub is_favorite: bool,
    /// Viewer has opened this recipe before
    pub is_watched: bool,
    /// Recipe comes from the local catalog rather than the external API
    pub is_user_recipe: bool,
}

/// Own recipe listed with viewer flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecipeSummary {
    /// Preview fields
    #[serde(flatten)]
    pub preview: RecipePreview,
    /// Viewer has opened this recipe before
    pub is_watched: bool,
    /// Viewer saved this recipe as a favorite
    pub is_favorite: bool,
}

/// Input for creating a local recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Recipe title
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text cooking time
    pub cook_time: Option<String>,
    /// Initial like counter
    #[serde(default)]
    pub likes: i64,
    /// Vegan flag
    #[serde(default)]
    pub is_vegan: bool,
    /// Vegetarian flag
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Gluten-free flag
    #[serde(default)]
    pub is_gluten_free: bool,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Newline-separated instructions
    pub instructions: String,
    /// Number of servings
    pub servings: Option<u32>,
}

/// Input for creating a family recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFamilyRecipe {
    /// Recipe title
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text cooking time
    pub cook_time: Option<String>,
    /// Vegan flag
    #[serde(default)]
    pub is_vegan: bool,
    /// Vegetarian flag
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Gluten-free flag
    #[serde(default)]
    pub is_gluten_free: bool,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Instructions text
    pub instructions: String,
    /// Number of servings
    pub servings: Option<u32>,
    /// Family member the recipe comes from
    pub who_made_it: String,
    /// Occasion or period the recipe is made for
    pub when_made: String,
}

/// Stored family recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecipe {
    /// Row identifier
    #[serde(rename = "recipeId")]
    pub id: i64,
    /// Title
    pub title: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text cooking time
    pub cook_time: Option<String>,
    /// Vegan flag
    pub is_vegan: bool,
    /// Vegetarian flag
    pub is_vegetarian: bool,
    /// Gluten-free flag
    pub is_gluten_free: bool,
    /// Comma-joined ingredient list
    pub ingredients: String,
    /// Instructions text
    pub instructions: String,
    /// Number of servings
    pub servings: Option<i64>,
    /// Family member the recipe comes from
    pub who_made_it: String,
    /// Occasion or period the recipe is made for
    pub when_made: String,
}

/// Sort order accepted by the external search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    /// Most liked first
    Popularity,
    /// Quickest first
    Time,
}

impl SearchSort {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Time => "time",
        }
    }

    /// Parse a sort keyword; unsupported keywords are ignored
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "popularity" => Some(Self::Popularity),
            "time" => Some(Self::Time),
            _ => None,
        }
    }
}

/// External recipe search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query
    pub query: String,
    /// Maximum number of results
    pub limit: u32,
    /// Cuisine filter
    pub cuisine: Option<String>,
    /// Diet filter
    pub diet: Option<String>,
    /// Intolerances filter
    pub intolerances: Option<String>,
    /// Sort order
    pub sort: Option<SearchSort>,
}

impl SearchQuery {
    /// Query with default limit and no filters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: defaults::SEARCH_LIMIT,
            cuisine: None,
            diet: None,
            intolerances: None,
            sort: None,
        }
    }
}
