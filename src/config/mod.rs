// ABOUTME: Configuration management module for centralized catalog settings
// ABOUTME: Handles environment configs, database settings, and external API settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! Configuration is environment-only: every value comes from a process
//! environment variable (optionally seeded from a `.env` file) with a
//! default when unset.

/// External recipe API configuration
pub mod api_providers;
/// Database connection configuration
pub mod database;
/// Top-level server configuration assembled from the environment
pub mod environment;

pub use api_providers::SpoonacularApiConfig;
pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{
    CatalogBehaviorConfig, Environment, LogLevel, RandomRecipeSource, ServerConfig,
};
