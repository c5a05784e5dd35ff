// ABOUTME: Configuration management module for runtime settings
// ABOUTME: Exposes environment-driven storage, detection, scoring, and retry configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Posefit
//!
//! All settings come from environment variables with documented defaults:
//!
//! - **Storage**: `DATABASE_URL`, `POSEFIT_PENDING_OPS_PATH`
//! - **Detection**: `POSEFIT_PUSHUP_TOP_ANGLE`, `POSEFIT_PUSHUP_BOTTOM_ANGLE`
//! - **Scoring**: `POSEFIT_POINTS_PER_PUSHUP`, `POSEFIT_MIN_AWARD_INTERVAL_MS`,
//!   `POSEFIT_PLANK_INTERVAL_MS`, `POSEFIT_ACHIEVEMENT_POINTS`
//! - **Retries**: `POSEFIT_RETRY_MAX_ATTEMPTS`, `POSEFIT_RETRY_BASE_DELAY_MS`,
//!   `POSEFIT_RETRY_JITTER_MS`

/// Environment configuration
pub mod environment;

pub use environment::{DatabaseUrl, PosefitConfig};
