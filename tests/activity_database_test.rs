// ABOUTME: Integration tests for per-user activity storage: favorites, view history, last search
// ABOUTME: Covers idempotent favorites, newest-first history limits, and search replacement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{create_test_database, create_test_user};
use recipe_catalog::database::FavoriteOutcome;
use recipe_catalog::models::RecipeId;

fn ids(raw: &[i64]) -> Vec<RecipeId> {
    raw.iter().copied().map(RecipeId::new).collect()
}

// ================================================================================================
// Favorites
// ================================================================================================

#[tokio::test]
async fn test_adding_a_favorite_twice_reports_already_present() {
    let database = create_test_database().await;
    let user = create_test_user(&database, "alice").await;
    let activity = database.activity();

    let first = activity.add_favorite(user, RecipeId::new(716_429)).await.unwrap();
    let second = activity.add_favorite(user, RecipeId::new(716_429)).await.unwrap();

    assert_eq!(first, FavoriteOutcome::Added);
    assert_eq!(second, FavoriteOutcome::AlreadyPresent);
    assert_eq!(activity.list_favorite_ids(user).await.unwrap(), ids(&[716_429]));
}

#[tokio::test]
async fn test_favorites_list_in_insertion_order_per_user() {
    let database = create_test_database().await;
    let alice = create_test_user(&database, "alice").await;
    let bob = create_test_user(&database, "bob").await;
    let activity = database.activity();

    for id in [30, 10, 20] {
        activity.add_favorite(alice, RecipeId::new(id)).await.unwrap();
    }
    activity.add_favorite(bob, RecipeId::new(99)).await.unwrap();

    assert_eq!(activity.list_favorite_ids(alice).await.unwrap(), ids(&[30, 10, 20]));
    assert_eq!(activity.list_favorite_ids(bob).await.unwrap(), ids(&[99]));
    assert!(activity.is_favorite(alice, RecipeId::new(10)).await.unwrap());
    assert!(!activity.is_favorite(bob, RecipeId::new(10)).await.unwrap());
}

#[tokio::test]
async fn test_remove_favorite_reports_whether_it_existed() {
    let database = create_test_database().await;
    let user = create_test_user(&database, "alice").await;
    let activity = database.activity();
    activity.add_favorite(user, RecipeId::new(5)).await.unwrap();

    assert!(activity.remove_favorite(user, RecipeId::new(5)).await.unwrap());
    assert!(!activity.remove_favorite(user, RecipeId::new(5)).await.unwrap());
    assert!(activity.list_favorite_ids(user).await.unwrap().is_empty());
}

// ================================================================================================
// View history
// ================================================================================================

#[tokio::test]
async fn test_recent_views_are_newest_first_and_limited() {
    let database = create_test_database().await;
    let user = create_test_user(&database, "alice").await;
    let activity = database.activity();
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    for (offset, id) in [1, 2, 3, 4].into_iter().enumerate() {
        let at = start + Duration::minutes(i64::try_from(offset).unwrap());
        activity.mark_watched_at(user, RecipeId::new(id), at).await.unwrap();
    }

    let recent = activity.recent_watched_ids(user, 3).await.unwrap();
    assert_eq!(recent, ids(&[4, 3, 2]));
}

#[tokio::test]
async fn test_repeat_view_moves_recipe_to_front() {
    let database = create_test_database().await;
    let user = create_test_user(&database, "alice").await;
    let activity = database.activity();
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    activity.mark_watched_at(user, RecipeId::new(1), start).await.unwrap();
    activity
        .mark_watched_at(user, RecipeId::new(2), start + Duration::minutes(1))
        .await
        .unwrap();
    activity
        .mark_watched_at(user, RecipeId::new(1), start + Duration::minutes(2))
        .await
        .unwrap();

    let recent = activity.recent_watched_ids(user, 3).await.unwrap();
    assert_eq!(recent, ids(&[1, 2]));
    assert_eq!(activity.watched_ids(user).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_is_watched_tracks_views_per_user() {
    let database = create_test_database().await;
    let alice = create_test_user(&database, "alice").await;
    let bob = create_test_user(&database, "bob").await;
    let activity = database.activity();

    activity.mark_watched(alice, RecipeId::new(8)).await.unwrap();

    assert!(activity.is_watched(alice, RecipeId::new(8)).await.unwrap());
    assert!(!activity.is_watched(bob, RecipeId::new(8)).await.unwrap());
    assert!(activity.recent_watched_ids(bob, 3).await.unwrap().is_empty());
}

// ================================================================================================
// Last search
// ================================================================================================

#[tokio::test]
async fn test_last_search_is_none_until_stored_then_replaced() {
    let database = create_test_database().await;
    let user = create_test_user(&database, "alice").await;
    let activity = database.activity();

    assert!(activity.last_search(user).await.unwrap().is_none());

    activity.store_last_search(user, &ids(&[3, 1, 2])).await.unwrap();
    assert_eq!(activity.last_search(user).await.unwrap(), Some(ids(&[3, 1, 2])));

    activity.store_last_search(user, &[]).await.unwrap();
    assert_eq!(activity.last_search(user).await.unwrap(), Some(Vec::new()));
}
