// ABOUTME: Application constants re-exported from recipe-core
// ABOUTME: Defaults, table names, external API defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

pub use recipe_core::constants::*;
