// ABOUTME: Recipe normalization and local/remote resolution
// ABOUTME: Turns stored rows and external payloads into one preview and one detail shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

/// Pure conversions from source records to normalized shapes
pub mod normalize;
/// Local-first resolution with concurrent external fallback
pub mod resolver;

pub use resolver::RecipeResolver;
