// ABOUTME: Exercise detection engine turning pose landmark frames into scored exercise events
// ABOUTME: Joint-angle geometry, plank and push-up classification, and per-exercise trackers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Posefit Detection
//!
//! Pure, synchronous detection logic. Nothing in this crate performs I/O:
//! trackers consume [`PoseFrame`](posefit_core::models::PoseFrame)s and return
//! [`TrackerEvent`]s, which the `posefit` scoring layer persists.
//!
//! ## Modules
//!
//! - **geometry**: Joint angles and distances in the image plane
//! - **classification**: Plank predicate and push-up position reading
//! - **trackers**: Push-up and plank state machines
//! - **fixtures**: Synthetic frames for tests, benchmarks, and demos

/// Joint-angle and distance helpers
pub mod geometry;

/// Pose classification predicates
pub mod classification;

/// Per-exercise state machines
pub mod trackers;

/// Synthetic landmark frames for canonical poses
pub mod fixtures;

pub use classification::{
    classify_plank, classify_push_up, is_plank, BodyPose, DetectionThresholds, PlankForm,
    PushUpReading,
};
pub use geometry::{calculate_angle, distance};
pub use trackers::{
    ExerciseTracker, PlankTier, PlankTracker, PushUpTracker, ScoringRules, SessionSummary,
    TrackerEvent,
};
