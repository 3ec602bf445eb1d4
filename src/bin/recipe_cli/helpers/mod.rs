// ABOUTME: Re-exports helper modules for recipe-cli
// ABOUTME: Provides access to output formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

pub mod display;
