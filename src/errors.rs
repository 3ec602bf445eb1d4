// ABOUTME: Unified error handling re-exported from recipe-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable for the main crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

pub use recipe_core::errors::*;
