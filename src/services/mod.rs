// ABOUTME: Service layer for user-facing catalog operations
// ABOUTME: Composes persistence managers, the external client, and the resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Business logic that sits between an eventual transport layer and the
//! database/resolver modules.

/// Recipe catalog operations
pub mod catalog;

pub use catalog::RecipeCatalog;
