// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Assembles ServerConfig from environment variables with validation and a safe summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management

use super::api_providers::SpoonacularApiConfig;
use super::database::DatabaseConfig;
use crate::constants::{defaults, env_vars, service_names};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Variable lookup used by every `from_lookup` constructor
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debugging output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Where `random_recipe` draws from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RandomRecipeSource {
    /// `ORDER BY RANDOM()` over the local catalog
    #[default]
    Local,
    /// The external API's random endpoint
    External,
}

impl RandomRecipeSource {
    /// Parse from string with fallback to `Local`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "external" | "remote" | "spoonacular" => Self::External,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for RandomRecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Catalog behavior knobs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogBehaviorConfig {
    /// Source of random recipes
    pub random_source: RandomRecipeSource,
    /// Size of the recently viewed list
    pub last_viewed_limit: u32,
    /// Search size when the caller gives none
    pub default_search_limit: u32,
}

impl Default for CatalogBehaviorConfig {
    fn default() -> Self {
        Self {
            random_source: RandomRecipeSource::default(),
            last_viewed_limit: defaults::LAST_VIEWED_LIMIT,
            default_search_limit: defaults::SEARCH_LIMIT,
        }
    }
}

impl CatalogBehaviorConfig {
    /// Load catalog behavior through a variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a limit variable is not a number
    pub fn from_lookup(lookup: &Lookup<'_>) -> AppResult<Self> {
        Ok(Self {
            random_source: RandomRecipeSource::from_str_or_default(&env_var_or(
                lookup,
                env_vars::RANDOM_RECIPE_SOURCE,
                "local",
            )),
            last_viewed_limit: parse_env(
                lookup,
                env_vars::LAST_VIEWED_LIMIT,
                defaults::LAST_VIEWED_LIMIT,
            )?,
            default_search_limit: parse_env(
                lookup,
                env_vars::DEFAULT_SEARCH_LIMIT,
                defaults::SEARCH_LIMIT,
            )?,
        })
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database configuration
    pub database: DatabaseConfig,
    /// External recipe API configuration
    pub spoonacular: SpoonacularApiConfig,
    /// Catalog behavior
    pub catalog: CatalogBehaviorConfig,
    /// Service name
    pub service_name: String,
    /// Service version (from Cargo.toml)
    pub service_version: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value or validation fails
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value or validation fails
    pub fn from_lookup(lookup: &Lookup<'_>) -> AppResult<Self> {
        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                lookup,
                env_vars::ENVIRONMENT,
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or(lookup, "RUST_LOG", "info")),
            database: DatabaseConfig::from_lookup(lookup)?,
            spoonacular: SpoonacularApiConfig::from_lookup(lookup)?,
            catalog: CatalogBehaviorConfig::from_lookup(lookup)?,
            service_name: env_var_or(lookup, "SERVICE_NAME", service_names::RECIPE_CATALOG),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for zero timeouts or zero list sizes
    pub fn validate(&self) -> AppResult<()> {
        if self.spoonacular.timeout_secs == 0 {
            return Err(AppError::config(
                "SPOONACULAR_TIMEOUT_SECS must be greater than zero",
            ));
        }
        if self.catalog.default_search_limit == 0 {
            return Err(AppError::config(
                "DEFAULT_SEARCH_LIMIT must be greater than zero",
            ));
        }
        if self.catalog.last_viewed_limit == 0 {
            return Err(AppError::config(
                "LAST_VIEWED_LIMIT must be greater than zero",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::config(
                "DATABASE_MAX_CONNECTIONS must be greater than zero",
            ));
        }

        if self.spoonacular.api_key.is_none() {
            warn!("SPOONACULAR_API_KEY is not set; external recipe lookups will be rejected");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Catalog Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Auto Migrate: {}\n\
             - Recipe API: {} (key {})\n\
             - Random Recipes: {}\n\
             - Last Viewed Limit: {}\n\
             - Default Search Limit: {}",
            self.environment,
            self.log_level,
            self.database.url,
            self.database.auto_migrate,
            self.spoonacular.base_url,
            if self.spoonacular.api_key.is_some() {
                "configured"
            } else {
                "missing"
            },
            self.catalog.random_source,
            self.catalog.last_viewed_limit,
            self.catalog.default_search_limit,
        )
    }
}

/// Get a variable or default value
pub(crate) fn env_var_or(lookup: &Lookup<'_>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

/// Parse a variable, falling back to `default` when unset
pub(crate) fn parse_env<T>(lookup: &Lookup<'_>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
    })
}
