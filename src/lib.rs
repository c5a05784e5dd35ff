// ABOUTME: Main library entry point for the Posefit exercise tracking platform
// ABOUTME: Wires pose-driven exercise detection to progress storage and gamification services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Posefit
//!
//! Counts push-ups and times planks from pose-estimation landmarks, then
//! turns the results into points, attributes, achievements, daily challenges,
//! and a leaderboard.
//!
//! ## Architecture
//!
//! - **posefit-core**: Errors, models, and constants shared by every crate
//! - **posefit-detection**: Geometry, classification, and exercise trackers
//! - **storage**: [`storage::ProgressStore`] with in-memory and `SQLite` backends
//! - **services**: Scoring, achievements, challenges, leaderboard, streaks
//! - **session**: [`session::WorkoutSession`] routing tracker events to services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use posefit::config::PosefitConfig;
//! use posefit::models::{ExerciseType, UserIdentity};
//! use posefit::services::Services;
//! use posefit::session::WorkoutSession;
//! use posefit::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PosefitConfig::from_env();
//!     let services = Services::from_config(&config).await?;
//!     let user = UserIdentity::new("user-1", "Ana");
//!     let session = WorkoutSession::start(user, ExerciseType::PushUp, services).await?;
//!     // feed frames with session.process_frame(&frame).await?
//!     session.finish(0).await?;
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Structured logging setup and application log helpers
pub mod logging;

/// Retry with exponential backoff for store writes
pub mod resilience;

/// Gamification services
pub mod services;

/// Live workout sessions
pub mod session;

/// Progress storage backends
pub mod storage;

pub use posefit_core::{constants, errors, models};
pub use posefit_detection as detection;
