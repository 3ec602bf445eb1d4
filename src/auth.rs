// ABOUTME: Password hashing and verification for catalog user accounts
// ABOUTME: Runs bcrypt on the blocking thread pool to keep the async executor free
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};

/// bcrypt cost used outside of debug builds
pub const PRODUCTION_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt cost for debug builds and tests (cost 4 is ~60x faster than 12)
pub const FAST_BCRYPT_COST: u32 = 4;

/// Cost chosen for the current build profile
#[must_use]
pub const fn default_bcrypt_cost() -> u32 {
    if cfg!(debug_assertions) {
        FAST_BCRYPT_COST
    } else {
        PRODUCTION_BCRYPT_COST
    }
}

/// Hash a password with bcrypt using `spawn_blocking`
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(AppError::from)
}

/// Verify a password against a bcrypt hash using `spawn_blocking`
///
/// A malformed hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
