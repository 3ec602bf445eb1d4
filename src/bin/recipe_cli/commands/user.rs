// ABOUTME: User management commands for recipe-cli
// ABOUTME: Creates catalog accounts with bcrypt-hashed passwords
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use recipe_catalog::{errors::AppResult, models::NewUser, services::RecipeCatalog};
use serde_json::json;
use tracing::info;

use crate::helpers::display::print_json;

type Result<T> = AppResult<T>;

/// Register a new user and print its id
pub async fn create(catalog: &RecipeCatalog, user: NewUser) -> Result<()> {
    info!("Creating user: {}", user.username);

    let user_id = catalog.register(&user).await?;
    let profile = catalog.profile(user_id).await?;

    print_json(&json!({
        "userId": user_id,
        "profile": profile,
    }))
}
