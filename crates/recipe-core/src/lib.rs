// ABOUTME: Core types and constants for the recipe catalog backend
// ABOUTME: Foundation crate with error handling, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! catalog backend. It changes infrequently, so the main crate and its
//! binaries recompile without touching it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Recipe identifiers, local records, external payloads, previews and details
//! - **constants**: Defaults, environment variable names, and table names

/// Unified error handling system with standard error codes and HTTP status mapping
pub mod errors;

/// Recipe and user domain models shared by persistence, resolver, and clients
pub mod models;

/// Application constants organized by domain
pub mod constants;
