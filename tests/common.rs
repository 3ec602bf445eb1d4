// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, seeded users and recipes, and counting mock collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_catalog`

use async_trait::async_trait;
use recipe_catalog::{
    auth::FAST_BCRYPT_COST,
    config::{CatalogBehaviorConfig, DatabaseUrl},
    database::{Database, RecipeStore},
    errors::{AppError, AppResult},
    external::RecipeSource,
    models::{
        ExternalRecipePayload, LocalRecipeRecord, NewRecipe, NewUser, RecipeId, SearchQuery,
        UserId,
    },
    services::RecipeCatalog,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Barrier;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Migrated in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    let database = Database::connect(&DatabaseUrl::Memory, 1)
        .await
        .expect("in-memory database");
    database.migrate().await.expect("migrations");
    database
}

/// Registration input with a predictable password
pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        firstname: "Test".to_owned(),
        lastname: "User".to_owned(),
        country: "Israel".to_owned(),
        email: format!("{username}@example.com"),
        password: "pass123".to_owned(),
        profile_pic: None,
    }
}

/// Register a user with the fast bcrypt cost
pub async fn create_test_user(database: &Database, username: &str) -> UserId {
    database
        .users()
        .with_bcrypt_cost(FAST_BCRYPT_COST)
        .create_user(&new_user(username))
        .await
        .expect("create user")
}

/// Recipe input shaped like the seed data: free-text cook time, one line per step
pub fn new_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_owned(),
        image: Some(format!("https://img.example.com/{}.jpg", title.to_lowercase())),
        cook_time: Some("45 minutes".to_owned()),
        likes: 12,
        is_vegan: false,
        is_vegetarian: true,
        is_gluten_free: true,
        ingredients: vec!["2 eggs".to_owned(), "1 cup milk".to_owned()],
        instructions: "Whisk.\nCook.\nServe.".to_owned(),
        servings: Some(2),
    }
}

/// Insert a local recipe authored by `author`
pub async fn create_test_recipe(database: &Database, author: UserId, title: &str) -> RecipeId {
    database
        .recipes()
        .insert_recipe(author, &new_recipe(title))
        .await
        .expect("insert recipe")
}

/// Catalog over `database` and `source` with default behavior
pub fn create_test_catalog(database: &Database, source: Arc<dyn RecipeSource>) -> RecipeCatalog {
    create_test_catalog_with(database, source, CatalogBehaviorConfig::default())
}

/// Catalog with explicit behavior configuration
pub fn create_test_catalog_with(
    database: &Database,
    source: Arc<dyn RecipeSource>,
    config: CatalogBehaviorConfig,
) -> RecipeCatalog {
    RecipeCatalog::new(database, source, config)
        .with_user_manager(database.users().with_bcrypt_cost(FAST_BCRYPT_COST))
}

/// External payload with the given id and title
pub fn external_payload(id: i64, title: &str) -> ExternalRecipePayload {
    ExternalRecipePayload {
        id,
        title: title.to_owned(),
        ready_in_minutes: Some(25),
        image: Some(format!("https://spoonacular.example.com/{id}.jpg")),
        aggregate_likes: Some(99),
        vegan: true,
        vegetarian: true,
        gluten_free: false,
        instructions: Some("Mix. Bake. Cool.".to_owned()),
        servings: Some(4),
        extended_ingredients: None,
        analyzed_instructions: None,
    }
}

/// Local record as the database would return it
pub fn local_record(id: i64, title: &str) -> LocalRecipeRecord {
    LocalRecipeRecord {
        recipe_id: RecipeId::new(id),
        user_id: Some(UserId::new(1)),
        title: title.to_owned(),
        image: None,
        cook_time: Some("45 minutes".to_owned()),
        likes: Some(3),
        is_vegan: 1,
        is_vegetarian: 1,
        is_gluten_free: 0,
        instructions: Some("Chop.\nFry.\n".to_owned()),
        servings: Some(2),
    }
}

/// In-memory `RecipeStore` that counts calls and can be told to fail
#[derive(Default)]
pub struct MockRecipeStore {
    records: HashMap<RecipeId, LocalRecipeRecord>,
    ingredients: HashMap<RecipeId, Vec<String>>,
    fail: bool,
    pub batch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
    pub batch_sizes: Mutex<Vec<usize>>,
}

impl MockRecipeStore {
    pub fn with_records(records: Vec<LocalRecipeRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.recipe_id, r)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_ingredients(mut self, id: i64, ingredients: &[&str]) -> Self {
        self.ingredients.insert(
            RecipeId::new(id),
            ingredients.iter().map(|s| (*s).to_owned()).collect(),
        );
        self
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::database("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecipeStore for MockRecipeStore {
    async fn find_recipes_by_ids(&self, ids: &[RecipeId]) -> AppResult<Vec<LocalRecipeRecord>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(ids.len());
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    async fn find_recipe_by_id(&self, id: RecipeId) -> AppResult<Option<LocalRecipeRecord>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.records.get(&id).cloned())
    }

    async fn list_ingredients(&self, id: RecipeId) -> AppResult<Vec<String>> {
        self.check()?;
        Ok(self.ingredients.get(&id).cloned().unwrap_or_default())
    }
}

/// In-memory `RecipeSource` that counts calls and fails for chosen ids
#[derive(Default)]
pub struct MockRecipeSource {
    payloads: HashMap<RecipeId, ExternalRecipePayload>,
    failing: HashSet<RecipeId>,
    search_hits: Vec<RecipeId>,
    barrier: Option<Arc<Barrier>>,
    pub fetch_calls: AtomicUsize,
    pub fetched_ids: Mutex<Vec<RecipeId>>,
    pub search_calls: AtomicUsize,
    pub random_calls: AtomicUsize,
    pub last_query: Mutex<Option<SearchQuery>>,
}

impl MockRecipeSource {
    pub fn with_payloads(payloads: Vec<ExternalRecipePayload>) -> Self {
        Self {
            payloads: payloads
                .into_iter()
                .map(|p| (RecipeId::new(p.id), p))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_for(mut self, ids: &[i64]) -> Self {
        self.failing.extend(ids.iter().copied().map(RecipeId::new));
        self
    }

    /// Hold every fetch until `parties` fetches are in flight at once
    pub fn concurrent_with(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn with_search_hits(mut self, ids: &[i64]) -> Self {
        self.search_hits = ids.iter().copied().map(RecipeId::new).collect();
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn fetched_ids(&self) -> Vec<RecipeId> {
        self.fetched_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeSource for MockRecipeSource {
    async fn fetch_recipe_by_id(&self, id: RecipeId) -> AppResult<ExternalRecipePayload> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_ids.lock().unwrap().push(id);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.failing.contains(&id) {
            return Err(AppError::external_service("Mock API", "HTTP 500"));
        }
        self.payloads
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::external_service("Mock API", "HTTP 404 Not Found"))
    }

    async fn search_recipe_ids(&self, query: &SearchQuery) -> AppResult<Vec<RecipeId>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self.search_hits.clone())
    }

    async fn random_recipes(&self, count: u32) -> AppResult<Vec<ExternalRecipePayload>> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .payloads
            .values()
            .take(count as usize)
            .cloned()
            .collect())
    }
}
