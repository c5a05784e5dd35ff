// ABOUTME: Core types and constants for the Posefit exercise tracking platform
// ABOUTME: Foundation crate with error handling, data models, and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Posefit Core
//!
//! Foundation crate providing shared types and constants for Posefit. This
//! crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Detection thresholds, scoring rules, and the achievement catalog
//! - **models**: Landmarks, exercise kinds, user progress, achievements, challenges, rankings

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
