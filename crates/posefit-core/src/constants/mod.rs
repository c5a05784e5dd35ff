// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Detection thresholds, scoring rules, challenge ranges, retry defaults, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Values here are defaults; the ones that
//! can be tuned at runtime are read through `posefit::config`.

/// Achievement catalog
pub mod achievements;

/// Pose thresholds for push-up and plank classification
pub mod detection {
    /// Both elbow angles above this (degrees) mean the arms are extended
    pub const PUSHUP_TOP_ANGLE: f32 = 150.0;
    /// Both elbow angles below this (degrees) mean the chest is lowered
    pub const PUSHUP_BOTTOM_ANGLE: f32 = 115.0;
    /// Maximum vertical offset between the two shoulders
    pub const PUSHUP_SHOULDER_LEVEL_TOLERANCE: f32 = 0.12;
    /// Maximum vertical offset between shoulders and hips
    pub const PUSHUP_SHOULDER_HIP_TOLERANCE: f32 = 0.20;
    /// Maximum distance of the hips from the shoulder-ankle midpoint
    pub const PUSHUP_HIP_SAG_TOLERANCE: f32 = 0.15;
    /// Lower bound of wrist spacing relative to shoulder spacing
    pub const PUSHUP_MIN_HAND_RATIO: f32 = 0.6;
    /// Upper bound of wrist spacing relative to shoulder spacing
    pub const PUSHUP_MAX_HAND_RATIO: f32 = 1.7;

    /// Both hip angles must exceed this (degrees) for any plank
    pub const PLANK_MIN_HIP_ANGLE: f32 = 150.0;
    /// Both elbow angles above this (degrees) mean a straight-arm plank
    pub const PLANK_STRAIGHT_ARM_ANGLE: f32 = 155.0;
    /// Straight-arm plank: maximum shoulder-hip and hip-ankle vertical offset
    pub const PLANK_STRAIGHT_ALIGNMENT_TOLERANCE: f32 = 0.12;
    /// Elbow plank: smallest accepted elbow angle (degrees)
    pub const PLANK_ELBOW_MIN_ANGLE: f32 = 65.0;
    /// Elbow plank: largest accepted elbow angle (degrees)
    pub const PLANK_ELBOW_MAX_ANGLE: f32 = 120.0;
    /// Elbow plank: maximum shoulder-hip vertical offset
    pub const PLANK_ELBOW_SHOULDER_HIP_TOLERANCE: f32 = 0.2;
    /// Elbow plank: maximum hip-ankle vertical offset
    pub const PLANK_ELBOW_HIP_ANKLE_TOLERANCE: f32 = 0.15;
    /// Elbow plank: maximum elbow-wrist vertical offset for a flat forearm
    pub const PLANK_FOREARM_LEVEL_TOLERANCE: f32 = 0.15;
    /// Elbow plank: maximum horizontal offset of an elbow from its shoulder
    pub const PLANK_ELBOW_UNDER_SHOULDER_TOLERANCE: f32 = 0.25;
}

/// Point, attribute, and calorie rules
pub mod scoring {
    /// Starting value of every attribute
    pub const DEFAULT_ATTRIBUTE_VALUE: f32 = 10.0;
    /// Points per push-up, multiplied by the consecutive rep count
    pub const POINTS_PER_PUSHUP: i64 = 1;
    /// Minimum time between two push-up point awards
    pub const MIN_AWARD_INTERVAL_MS: i64 = 5_000;
    /// Calories burned per push-up
    pub const CALORIES_PER_PUSHUP: f64 = 0.4;
    /// Strength gained per push-up award
    pub const STRENGTH_PER_AWARD: f32 = 0.5;
    /// Length of one scored plank interval
    pub const PLANK_INTERVAL_MS: i64 = 2_000;
    /// Points per plank interval
    pub const POINTS_PER_PLANK_INTERVAL: i64 = 1;
    /// Stamina gained per plank interval
    pub const STAMINA_PER_PLANK_INTERVAL: f32 = 0.2;
    /// Planks shorter than this are not saved to history
    pub const MIN_SAVED_PLANK_SECS: u32 = 3;
    /// Plank holds that announce a milestone
    pub const PLANK_MILESTONES_SECS: [u32; 4] = [15, 30, 60, 120];
    /// Planks at least this long get a tier announcement
    pub const PLANK_TIER_ANNOUNCE_SECS: u32 = 15;
    /// Bonus for unlocking an achievement
    pub const ACHIEVEMENT_POINTS: i64 = 25;
    /// Leaderboard rows returned by default
    pub const LEADERBOARD_LIMIT: usize = 20;
}

/// Daily challenge generation ranges
pub mod challenges {
    /// Push-up targets: 5 to 30 in steps of 5
    pub const PUSHUP_TARGETS: [u32; 6] = [5, 10, 15, 20, 25, 30];
    /// Plank targets in seconds: 30 to 120 in steps of 15
    pub const PLANK_TARGETS: [u32; 7] = [30, 45, 60, 75, 90, 105, 120];
    /// Crunch targets: 10 to 50 in steps of 10
    pub const CRUNCH_TARGETS: [u32; 5] = [10, 20, 30, 40, 50];
}

/// Retry policy defaults for progress writes
pub mod retry {
    /// Attempts before giving up
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Base delay, doubled on each attempt
    pub const BASE_DELAY_MS: u64 = 100;
    /// Upper bound (exclusive) of the random jitter added to each delay
    pub const JITTER_MS: u64 = 50;
}

/// Environment variable names
pub mod env_config {
    /// Storage backend location
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// File holding operations that exhausted their retries
    pub const PENDING_OPS_PATH: &str = "POSEFIT_PENDING_OPS_PATH";
    /// Push-up top angle override
    pub const PUSHUP_TOP_ANGLE: &str = "POSEFIT_PUSHUP_TOP_ANGLE";
    /// Push-up bottom angle override
    pub const PUSHUP_BOTTOM_ANGLE: &str = "POSEFIT_PUSHUP_BOTTOM_ANGLE";
    /// Points per push-up override
    pub const POINTS_PER_PUSHUP: &str = "POSEFIT_POINTS_PER_PUSHUP";
    /// Push-up award throttle override
    pub const MIN_AWARD_INTERVAL_MS: &str = "POSEFIT_MIN_AWARD_INTERVAL_MS";
    /// Plank interval override
    pub const PLANK_INTERVAL_MS: &str = "POSEFIT_PLANK_INTERVAL_MS";
    /// Achievement bonus override
    pub const ACHIEVEMENT_POINTS: &str = "POSEFIT_ACHIEVEMENT_POINTS";
    /// Retry attempt override
    pub const RETRY_MAX_ATTEMPTS: &str = "POSEFIT_RETRY_MAX_ATTEMPTS";
    /// Retry base delay override
    pub const RETRY_BASE_DELAY_MS: &str = "POSEFIT_RETRY_BASE_DELAY_MS";
    /// Retry jitter override
    pub const RETRY_JITTER_MS: &str = "POSEFIT_RETRY_JITTER_MS";
    /// Log output format
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment label for logs
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default paths and URLs
pub mod defaults {
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/posefit.db";
    /// `DATABASE_URL` value selecting the in-memory store
    pub const MEMORY_DATABASE: &str = "memory";
    /// Default pending operation file
    pub const PENDING_OPS_PATH: &str = "./data/pending_operations.json";
    /// Service name attached to log records
    pub const SERVICE_NAME: &str = "posefit";
}
