// ABOUTME: Domain models shared across the recipe catalog crates
// ABOUTME: Re-exports recipe identifiers, records, payloads, previews, and user types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

/// Recipe identifiers, stored records, external payloads, and normalized shapes
pub mod recipe;

/// User identifiers and profile records
pub mod user;

pub use recipe::{
    AnalyzedInstruction, AnalyzedStep, ExtendedIngredient, ExternalRecipePayload,
    FamilyRecipe, InstructionStep, LocalRecipeRecord, NewFamilyRecipe, NewRecipe, RecipeDetail,
    RecipeId, RecipePreview, SearchQuery, SearchSort, UserRecipeSummary,
};
pub use user::{NewUser, UserId, UserProfile};
