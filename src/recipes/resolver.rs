// ABOUTME: Recipe resolver: local catalog first, external API for whatever the catalog lacks
// ABOUTME: Batch previews use one IN query plus a concurrent fan-out over the residual ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! # Recipe Resolver
//!
//! Stateless composition of a [`RecipeStore`] and a [`RecipeSource`].
//!
//! Batch resolution never fails: ids that cannot be resolved are omitted,
//! and a broken database yields an empty list. Single-recipe resolution
//! propagates database errors but treats an external failure as "not found".

use super::normalize::{
    normalize_external_detail, normalize_external_preview, normalize_local_detail,
    normalize_local_preview,
};
use crate::database::RecipeStore;
use crate::errors::AppResult;
use crate::external::RecipeSource;
use crate::models::{RecipeDetail, RecipeId, RecipePreview};
use futures_util::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Local-first recipe lookup with external fallback
#[derive(Clone)]
pub struct RecipeResolver {
    store: Arc<dyn RecipeStore>,
    source: Arc<dyn RecipeSource>,
}

impl RecipeResolver {
    /// Create a resolver over a local store and an external source
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>, source: Arc<dyn RecipeSource>) -> Self {
        Self { store, source }
    }

    /// Previews for textual ids, as received from a request
    ///
    /// Malformed ids are dropped before any lookup.
    pub async fn resolve_previews_raw<S>(&self, raw_ids: &[S]) -> Vec<RecipePreview>
    where
        S: AsRef<str> + Sync,
    {
        let ids: Vec<RecipeId> = raw_ids
            .iter()
            .filter_map(|raw| {
                let parsed = RecipeId::parse(raw.as_ref());
                if parsed.is_none() {
                    debug!(raw_id = raw.as_ref(), "Dropping malformed recipe id");
                }
                parsed
            })
            .collect();
        self.resolve_previews(&ids).await
    }

    /// Previews for `ids` in caller order
    ///
    /// Duplicates collapse to their first occurrence. Ids found neither
    /// locally nor externally are omitted.
    pub async fn resolve_previews(&self, ids: &[RecipeId]) -> Vec<RecipePreview> {
        let ids = dedupe(ids);
        if ids.is_empty() {
            return Vec::new();
        }

        let local: HashMap<RecipeId, RecipePreview> =
            match self.store.find_recipes_by_ids(&ids).await {
                Ok(records) => records
                    .iter()
                    .map(|record| (record.recipe_id, normalize_local_preview(record)))
                    .collect(),
                Err(e) => {
                    error!(error = %e, requested = ids.len(), "Local recipe lookup failed");
                    return Vec::new();
                }
            };

        let residual: Vec<RecipeId> = ids
            .iter()
            .copied()
            .filter(|id| !local.contains_key(id))
            .collect();

        let external: HashMap<RecipeId, RecipePreview> = join_all(
            residual
                .iter()
                .map(|&id| async move { (id, self.fetch_external_preview(id).await) }),
        )
        .await
        .into_iter()
        .filter_map(|(id, preview)| preview.map(|p| (id, p)))
        .collect();

        debug!(
            requested = ids.len(),
            local = local.len(),
            external = external.len(),
            "Resolved recipe previews"
        );

        ids.iter()
            .filter_map(|id| local.get(id).or_else(|| external.get(id)).cloned())
            .collect()
    }

    async fn fetch_external_preview(&self, id: RecipeId) -> Option<RecipePreview> {
        match self.source.fetch_recipe_by_id(id).await {
            Ok(payload) => Some(normalize_external_preview(&payload)),
            Err(e) => {
                warn!(recipe.id = %id, error = %e, "External recipe fetch failed");
                None
            }
        }
    }

    /// Full detail of one recipe
    ///
    /// A local recipe never touches the external API. An external failure
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the local lookup fails
    pub async fn resolve_details(&self, id: RecipeId) -> AppResult<Option<RecipeDetail>> {
        if let Some(record) = self.store.find_recipe_by_id(id).await? {
            let ingredients = self.store.list_ingredients(id).await?;
            return Ok(Some(normalize_local_detail(&record, ingredients)));
        }

        match self.source.fetch_recipe_by_id(id).await {
            Ok(payload) => Ok(Some(normalize_external_detail(&payload))),
            Err(e) => {
                warn!(recipe.id = %id, error = %e, "External recipe detail fetch failed");
                Ok(None)
            }
        }
    }
}

/// Keep the first occurrence of every id
fn dedupe(ids: &[RecipeId]) -> Vec<RecipeId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
