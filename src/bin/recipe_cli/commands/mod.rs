// ABOUTME: Re-exports command modules for recipe-cli
// ABOUTME: Provides access to recipe lookup and user management commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

pub mod recipes;
pub mod user;
