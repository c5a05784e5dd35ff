// ABOUTME: Core data models shared by detection, scoring, and storage
// ABOUTME: Landmarks, exercise kinds, user progress, achievements, challenges, and rankings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain serializable types. Behaviour lives in `posefit-detection` and the
//! `posefit` services; these types only carry data between them.

mod achievement;
mod challenge;
mod exercise;
mod landmark;
mod progress;
mod ranking;

pub use achievement::{Achievement, AchievementCategory, AchievementDefinition, AchievementMetric};
pub use challenge::DailyChallenge;
pub use exercise::ExerciseType;
pub use landmark::{BodyLandmark, Landmark, Point2, PoseFrame};
pub use progress::{
    Attribute, Attributes, ExerciseDelta, PendingOperation, PendingUpdate, PlankStats, PushUpStats,
    SessionRecord, UserIdentity, UserProfile, WorkoutAnalytics,
};
pub use ranking::{LeaderboardDelta, UserRanking};
