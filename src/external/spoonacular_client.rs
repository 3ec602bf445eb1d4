// ABOUTME: Spoonacular-compatible recipe API client for recipe information, search, and random picks
// ABOUTME: Maps transport failures and HTTP statuses onto the catalog's external error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Spoonacular Recipe API Client
//!
//! Thin wrapper over three endpoints of the recipes API:
//! - `GET {base}/{id}/information`
//! - `GET {base}/complexSearch`
//! - `GET {base}/random`
//!
//! No caching and no retries: every call goes to the network once.
//!
//! # Example
//! ```rust,no_run
//! use recipe_catalog::config::SpoonacularApiConfig;
//! use recipe_catalog::external::{RecipeSource, SpoonacularClient};
//! use recipe_catalog::models::RecipeId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SpoonacularApiConfig {
//!     api_key: Some("your_api_key".to_owned()),
//!     ..SpoonacularApiConfig::default()
//! };
//! let client = SpoonacularClient::new(config)?;
//! let recipe = client.fetch_recipe_by_id(RecipeId::new(716_429)).await?;
//! println!("{}", recipe.title);
//! # Ok(())
//! # }
//! ```

use super::RecipeSource;
use crate::config::SpoonacularApiConfig;
use crate::constants::spoonacular::SERVICE_NAME;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ExternalRecipePayload, RecipeId, SearchQuery};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// `complexSearch` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
}

/// `random` response
#[derive(Debug, Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<ExternalRecipePayload>,
}

/// Spoonacular recipe API client
pub struct SpoonacularClient {
    config: SpoonacularApiConfig,
    http_client: reqwest::Client,
}

impl SpoonacularClient {
    /// Create a new client with the configured timeouts
    ///
    /// A trailing `/` on the base URL is dropped so request paths never double it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: SpoonacularApiConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_owned();
        Ok(Self {
            config: SpoonacularApiConfig { base_url, ..config },
            http_client,
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.config.api_key.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE_NAME}: API key is not configured"),
            )
        })
    }

    /// Send a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/{path}", self.config.base_url);
        debug!(url = %url, "Calling external recipe API");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key()?)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AppError::external_unavailable(SERVICE_NAME, e.to_string()).with_source(e)
                } else {
                    AppError::external_service(SERVICE_NAME, e.to_string()).with_source(e)
                }
            })?;

        let response = check_status(response).await?;

        response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })
    }
}

/// Turn a non-success status into the matching error code
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = format!("{SERVICE_NAME}: HTTP {status}: {body}");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::PAYMENT_REQUIRED => {
            AppError::new(ErrorCode::ExternalAuthFailed, message)
        }
        StatusCode::TOO_MANY_REQUESTS => AppError::new(ErrorCode::ExternalRateLimited, message),
        _ => AppError::new(ErrorCode::ExternalServiceError, message),
    })
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn fetch_recipe_by_id(&self, id: RecipeId) -> AppResult<ExternalRecipePayload> {
        self.get_json(
            &format!("{id}/information"),
            &[("includeNutrition", "false".to_owned())],
        )
        .await
    }

    async fn search_recipe_ids(&self, query: &SearchQuery) -> AppResult<Vec<RecipeId>> {
        let mut params = vec![
            ("query", query.query.clone()),
            ("number", query.limit.to_string()),
            ("addRecipeInformation", "false".to_owned()),
        ];
        if let Some(cuisine) = &query.cuisine {
            params.push(("cuisine", cuisine.clone()));
        }
        if let Some(diet) = &query.diet {
            params.push(("diet", diet.clone()));
        }
        if let Some(intolerances) = &query.intolerances {
            params.push(("intolerances", intolerances.clone()));
        }
        if let Some(sort) = query.sort {
            params.push(("sort", sort.as_str().to_owned()));
        }

        let response: SearchResponse = self.get_json("complexSearch", &params).await?;
        Ok(response
            .results
            .into_iter()
            .map(|result| RecipeId::new(result.id))
            .collect())
    }

    async fn random_recipes(&self, count: u32) -> AppResult<Vec<ExternalRecipePayload>> {
        let response: RandomResponse = self
            .get_json("random", &[("number", count.to_string())])
            .await?;
        Ok(response.recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_rejected_before_any_request() {
        let client = SpoonacularClient::new(SpoonacularApiConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_owned(),
            ..SpoonacularApiConfig::default()
        })
        .unwrap();

        let error = client
            .fetch_recipe_by_id(RecipeId::new(1))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
    }
}
