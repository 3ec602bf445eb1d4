// ABOUTME: Domain models re-exported from recipe-core
// ABOUTME: Recipe identifiers, stored records, external payloads, previews, details, and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

pub use recipe_core::models::*;
