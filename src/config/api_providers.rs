// ABOUTME: External recipe API configuration (Spoonacular-compatible)
// ABOUTME: API key, base URL, and HTTP timeouts loaded from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use super::environment::{env_var_or, parse_env, Lookup};
use crate::constants::{env_vars, spoonacular};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};

/// Spoonacular API configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoonacularApiConfig {
    /// API key sent as the `apiKey` query parameter
    pub api_key: Option<String>,
    /// Base URL of the recipes endpoints
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for SpoonacularApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for SpoonacularApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: spoonacular::DEFAULT_BASE_URL.to_owned(),
            timeout_secs: spoonacular::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: spoonacular::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl SpoonacularApiConfig {
    /// Load external API configuration through a variable lookup
    ///
    /// `SPOONACULAR_API_KEY` wins over the legacy `spooncular_apiKey` spelling.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a number
    pub fn from_lookup(lookup: &Lookup<'_>) -> AppResult<Self> {
        let api_key = lookup(env_vars::SPOONACULAR_API_KEY)
            .or_else(|| lookup(env_vars::SPOONACULAR_API_KEY_LEGACY))
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            api_key,
            base_url: env_var_or(
                lookup,
                env_vars::SPOONACULAR_BASE_URL,
                spoonacular::DEFAULT_BASE_URL,
            )
            .trim_end_matches('/')
            .to_owned(),
            timeout_secs: parse_env(
                lookup,
                env_vars::SPOONACULAR_TIMEOUT_SECS,
                spoonacular::DEFAULT_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_env(
                lookup,
                env_vars::SPOONACULAR_CONNECT_TIMEOUT_SECS,
                spoonacular::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }
}
