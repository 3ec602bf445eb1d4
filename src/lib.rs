// ABOUTME: Main library entry point for the recipe catalog backend
// ABOUTME: Local recipe persistence with external recipe API fallback and preview aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Recipe Catalog
//!
//! Backend for a recipe catalog. Users register, author recipes, keep
//! favorites, and browse recipes that live either in the local SQLite
//! catalog or in a third-party recipe API.
//!
//! ## Architecture
//!
//! - **Database**: explicit `SqlitePool` owner with per-domain managers
//! - **External**: Spoonacular-compatible HTTP client
//! - **Recipes**: schema normalization and the local/remote resolver
//! - **Services**: user-facing catalog operations composed from the above
//! - **Config / Logging**: environment configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_catalog::config::environment::ServerConfig;
//! use recipe_catalog::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Password hashing and verification
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Application constants re-exported from `recipe-core`
pub mod constants;

/// SQLite persistence: recipes, users, favorites, history, family recipes
pub mod database;

/// Unified error handling re-exported from `recipe-core`
pub mod errors;

/// External recipe API clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// Domain models re-exported from `recipe-core`
pub mod models;

/// Recipe normalization and local/remote resolution
pub mod recipes;

/// User-facing catalog operations
pub mod services;
