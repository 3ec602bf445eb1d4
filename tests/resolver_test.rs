// ABOUTME: Integration tests for the recipe resolver's local-first lookup and external fallback
// ABOUTME: Verifies ordering, deduplication, failure isolation, and call counts against mock collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{external_payload, local_record, MockRecipeSource, MockRecipeStore};
use recipe_catalog::models::RecipeId;
use recipe_catalog::recipes::RecipeResolver;
use std::sync::Arc;
use std::time::Duration;

fn ids(raw: &[i64]) -> Vec<RecipeId> {
    raw.iter().copied().map(RecipeId::new).collect()
}

fn resolver(
    store: MockRecipeStore,
    source: MockRecipeSource,
) -> (RecipeResolver, Arc<MockRecipeStore>, Arc<MockRecipeSource>) {
    common::init_test_logging();
    let store = Arc::new(store);
    let source = Arc::new(source);
    let resolver = RecipeResolver::new(store.clone(), source.clone());
    (resolver, store, source)
}

// ================================================================================================
// Batch previews
// ================================================================================================

#[tokio::test]
async fn test_all_local_ids_keep_caller_order_without_external_calls() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::with_records(vec![
            local_record(1, "Shakshuka"),
            local_record(2, "Hummus"),
            local_record(3, "Falafel"),
        ]),
        MockRecipeSource::default(),
    );

    let previews = resolver.resolve_previews(&ids(&[3, 1, 2])).await;

    let titles: Vec<&str> = previews.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Falafel", "Shakshuka", "Hummus"]);
    assert_eq!(store.batch_calls(), 1);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_mixed_ids_interleave_local_and_external_in_caller_order() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka"), local_record(2, "Hummus")]),
        MockRecipeSource::with_payloads(vec![
            external_payload(716_429, "Pasta"),
            external_payload(715_538, "Bruschetta"),
        ]),
    );

    let previews = resolver
        .resolve_previews(&ids(&[716_429, 1, 715_538, 2]))
        .await;

    let order: Vec<i64> = previews.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(order, vec![716_429, 1, 715_538, 2]);
    assert_eq!(store.batch_calls(), 1);
    assert_eq!(source.fetch_calls(), 2);

    let mut fetched = source.fetched_ids();
    fetched.sort();
    assert_eq!(fetched, ids(&[715_538, 716_429]));
}

#[tokio::test]
async fn test_duplicate_ids_collapse_to_first_occurrence() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka")]),
        MockRecipeSource::with_payloads(vec![external_payload(500, "Ramen")]),
    );

    let previews = resolver.resolve_previews(&ids(&[500, 1, 500, 1, 500])).await;

    let order: Vec<i64> = previews.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(order, vec![500, 1]);
    assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2]);
    assert_eq!(source.fetch_calls(), 1);
}

#[tokio::test]
async fn test_failed_external_fetch_omits_only_that_recipe() {
    let (resolver, _store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka")]),
        MockRecipeSource::with_payloads(vec![
            external_payload(100, "Tacos"),
            external_payload(300, "Curry"),
        ])
        .failing_for(&[200]),
    );

    let previews = resolver.resolve_previews(&ids(&[100, 200, 1, 300])).await;

    let order: Vec<i64> = previews.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(order, vec![100, 1, 300]);
    assert_eq!(source.fetch_calls(), 3);
}

#[tokio::test]
async fn test_external_fetches_are_in_flight_together() {
    let (resolver, _store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka")]),
        MockRecipeSource::with_payloads(vec![
            external_payload(100, "Tacos"),
            external_payload(300, "Curry"),
        ])
        .failing_for(&[200])
        .concurrent_with(3),
    );

    // Each fetch waits for the other two, so a sequential fan-out never finishes
    let previews = tokio::time::timeout(
        Duration::from_secs(5),
        resolver.resolve_previews(&ids(&[100, 1, 200, 300])),
    )
    .await
    .expect("external fetches should run concurrently");

    let order: Vec<i64> = previews.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(order, vec![100, 1, 300]);
    assert_eq!(source.fetch_calls(), 3);
}

#[tokio::test]
async fn test_unknown_everywhere_is_omitted() {
    let (resolver, _store, _source) = resolver(
        MockRecipeStore::default(),
        MockRecipeSource::with_payloads(vec![external_payload(10, "Soup")]),
    );

    let previews = resolver.resolve_previews(&ids(&[10, 11])).await;

    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].id, RecipeId::new(10));
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let (resolver, store, source) = resolver(MockRecipeStore::default(), MockRecipeSource::default());

    let previews = resolver.resolve_previews(&[]).await;

    assert!(previews.is_empty());
    assert_eq!(store.batch_calls(), 0);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_database_failure_yields_empty_result() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::failing(),
        MockRecipeSource::with_payloads(vec![external_payload(10, "Soup")]),
    );

    let previews = resolver.resolve_previews(&ids(&[10, 11])).await;

    assert!(previews.is_empty());
    assert_eq!(store.batch_calls(), 1);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_raw_ids_drop_malformed_entries() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka"), local_record(2, "Hummus")]),
        MockRecipeSource::default(),
    );

    let previews = resolver
        .resolve_previews_raw(&["2", "abc", "", "-4", "1", "2"])
        .await;

    let order: Vec<i64> = previews.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(order, vec![2, 1]);
    assert_eq!(*store.batch_sizes.lock().unwrap(), vec![2]);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_raw_ids_all_malformed_make_no_calls() {
    let (resolver, store, source) = resolver(MockRecipeStore::default(), MockRecipeSource::default());

    let previews = resolver.resolve_previews_raw(&["x", "1.5"]).await;

    assert!(previews.is_empty());
    assert_eq!(store.batch_calls(), 0);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_local_boolean_flags_and_cook_time_are_normalized() {
    let mut vegan = local_record(1, "Salad");
    vegan.is_vegan = 1;
    vegan.is_gluten_free = 1;
    vegan.cook_time = Some("15 minutes".to_owned());
    let mut regular = local_record(2, "Schnitzel");
    regular.is_vegan = 0;
    regular.is_vegetarian = 0;
    regular.cook_time = None;

    let (resolver, _store, _source) = resolver(
        MockRecipeStore::with_records(vec![vegan, regular]),
        MockRecipeSource::default(),
    );

    let previews = resolver.resolve_previews(&ids(&[1, 2])).await;

    assert!(previews[0].vegan);
    assert!(previews[0].gluten_free);
    assert_eq!(previews[0].ready_in_minutes, 15);
    assert!(!previews[1].vegan);
    assert!(!previews[1].vegetarian);
    assert!(!previews[1].gluten_free);
    assert_eq!(previews[1].ready_in_minutes, 30);
}

#[tokio::test]
async fn test_external_preview_fields_pass_through() {
    let (resolver, _store, _source) = resolver(
        MockRecipeStore::default(),
        MockRecipeSource::with_payloads(vec![external_payload(42, "Pad Thai")]),
    );

    let previews = resolver.resolve_previews(&ids(&[42])).await;

    let preview = &previews[0];
    assert_eq!(preview.title, "Pad Thai");
    assert_eq!(preview.ready_in_minutes, 25);
    assert_eq!(preview.popularity, 99);
    assert!(preview.vegan);
    assert!(!preview.gluten_free);
    assert_eq!(preview.image, "https://spoonacular.example.com/42.jpg");
}

// ================================================================================================
// Single detail
// ================================================================================================

#[tokio::test]
async fn test_local_detail_never_calls_external() {
    let (resolver, store, source) = resolver(
        MockRecipeStore::with_records(vec![local_record(1, "Shakshuka")])
            .with_ingredients(1, &["4 eggs", "2 tomatoes"]),
        MockRecipeSource::with_payloads(vec![external_payload(1, "Impostor")]),
    );

    let detail = resolver
        .resolve_details(RecipeId::new(1))
        .await
        .unwrap()
        .expect("local recipe");

    assert_eq!(detail.preview.title, "Shakshuka");
    assert!(detail.is_user_recipe);
    assert!(!detail.is_favorite);
    assert!(!detail.is_watched);
    assert_eq!(detail.ingredients, vec!["4 eggs", "2 tomatoes"]);
    let steps: Vec<(u32, &str)> = detail
        .steps
        .iter()
        .map(|s| (s.number, s.step.as_str()))
        .collect();
    assert_eq!(steps, vec![(1, "Chop."), (2, "Fry.")]);
    assert_eq!(store.single_calls(), 1);
    assert_eq!(source.fetch_calls(), 0);
}

#[tokio::test]
async fn test_external_detail_is_not_a_user_recipe() {
    let (resolver, _store, source) = resolver(
        MockRecipeStore::default(),
        MockRecipeSource::with_payloads(vec![external_payload(716_429, "Pasta")]),
    );

    let detail = resolver
        .resolve_details(RecipeId::new(716_429))
        .await
        .unwrap()
        .expect("external recipe");

    assert!(!detail.is_user_recipe);
    assert_eq!(detail.servings, Some(4));
    assert_eq!(detail.steps.len(), 3);
    assert_eq!(detail.steps[2].step, "Cool.");
    assert_eq!(source.fetch_calls(), 1);
}

#[tokio::test]
async fn test_external_detail_failure_is_absent() {
    let (resolver, _store, source) = resolver(
        MockRecipeStore::default(),
        MockRecipeSource::default().failing_for(&[9]),
    );

    let detail = resolver.resolve_details(RecipeId::new(9)).await.unwrap();

    assert!(detail.is_none());
    assert_eq!(source.fetch_calls(), 1);
}

#[tokio::test]
async fn test_detail_database_failure_is_an_error() {
    let (resolver, _store, source) = resolver(MockRecipeStore::failing(), MockRecipeSource::default());

    let result = resolver.resolve_details(RecipeId::new(9)).await;

    assert!(result.is_err());
    assert_eq!(source.fetch_calls(), 0);
}
