// ABOUTME: Per-user progress models: profile, attributes, exercise stats, and workout history
// ABOUTME: Also defines the incremental deltas and pending operations the scoring layer persists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseType;
use crate::constants::scoring::DEFAULT_ATTRIBUTE_VALUE;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Character attributes that grow with exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Raised by push-ups
    Strength,
    /// Reserved for agility exercises
    Agility,
    /// Raised by planks
    Stamina,
}

impl Attribute {
    /// Stable wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Stamina => "stamina",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Self::Strength),
            "agility" => Ok(Self::Agility),
            "stamina" => Ok(Self::Stamina),
            other => Err(AppError::invalid_input(format!("Unknown attribute '{other}'"))),
        }
    }
}

/// Attribute values of a user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Strength score
    pub strength: f32,
    /// Agility score
    pub agility: f32,
    /// Stamina score
    pub stamina: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ATTRIBUTE_VALUE,
            agility: DEFAULT_ATTRIBUTE_VALUE,
            stamina: DEFAULT_ATTRIBUTE_VALUE,
        }
    }
}

impl Attributes {
    /// Read one attribute
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> f32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Stamina => self.stamina,
        }
    }

    /// Mutable access to one attribute
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut f32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Stamina => &mut self.stamina,
        }
    }
}

/// Who progress is credited to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Opaque user identifier from the authentication provider
    pub user_id: String,
    /// Name shown on the leaderboard
    pub display_name: String,
}

impl UserIdentity {
    /// Identity with a display name
    #[must_use]
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Lifetime push-up statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushUpStats {
    /// Total repetitions recorded
    pub count: u32,
    /// Points earned from push-ups
    pub points: i64,
    /// Longest run of consecutive repetitions
    pub best_streak: u32,
}

/// Lifetime plank statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlankStats {
    /// Points earned from planks
    pub points: i64,
    /// Total seconds held
    pub total_seconds: u32,
    /// Longest single hold in seconds
    pub best_duration_secs: u32,
}

/// Workout history aggregates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutAnalytics {
    /// Time of the last saved workout session
    pub last_workout: Option<DateTime<Utc>>,
    /// Calories burned across all push-up awards
    pub total_calories_burned: f64,
    /// Consecutive days with a saved workout
    pub workout_streak: u32,
}

/// Everything persisted about one user's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user identifier from the authentication provider
    pub user_id: String,
    /// Name shown on the leaderboard
    pub display_name: String,
    /// Points from every source
    pub total_points: i64,
    /// Attribute scores
    pub attributes: Attributes,
    /// Push-up statistics
    pub push_ups: PushUpStats,
    /// Plank statistics
    pub plank: PlankStats,
    /// Workout analytics
    pub analytics: WorkoutAnalytics,
}

impl UserProfile {
    /// Default profile structure for a new user
    #[must_use]
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            total_points: 0,
            attributes: Attributes::default(),
            push_ups: PushUpStats::default(),
            plank: PlankStats::default(),
            analytics: WorkoutAnalytics::default(),
        }
    }

    /// Apply an exercise increment, including its points to the total
    pub fn apply(&mut self, delta: &ExerciseDelta) {
        match *delta {
            ExerciseDelta::PushUp {
                reps,
                points,
                calories,
            } => {
                self.push_ups.count += reps;
                self.push_ups.points += points;
                self.analytics.total_calories_burned += calories;
            }
            ExerciseDelta::Plank { points, seconds } => {
                self.plank.points += points;
                self.plank.total_seconds += seconds;
            }
        }
        self.total_points += delta.points();
    }
}

/// Increment applied to a user's exercise statistics in one write
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExerciseDelta {
    /// Push-up repetitions awarded together
    PushUp {
        /// Repetitions covered by this award
        reps: u32,
        /// Points earned
        points: i64,
        /// Calories burned
        calories: f64,
    },
    /// Plank intervals awarded together
    Plank {
        /// Points earned
        points: i64,
        /// Seconds held
        seconds: u32,
    },
}

impl ExerciseDelta {
    /// Points carried by this delta, also added to the total
    #[must_use]
    pub const fn points(&self) -> i64 {
        match self {
            Self::PushUp { points, .. } | Self::Plank { points, .. } => *points,
        }
    }

    /// Exercise this delta belongs to
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        match self {
            Self::PushUp { .. } => ExerciseType::PushUp,
            Self::Plank { .. } => ExerciseType::Plank,
        }
    }
}

/// A completed workout session kept in the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Exercise performed
    pub exercise: ExerciseType,
    /// When the session was saved
    pub recorded_at: DateTime<Utc>,
    /// Repetitions (push-ups) or zero for timed exercises
    pub count: u32,
    /// Points earned during the session
    pub points_earned: i64,
    /// Longest run of consecutive repetitions
    pub max_consecutive_reps: u32,
    /// Calories burned during the session
    pub calories_burned: f64,
    /// Session length in seconds
    pub duration_secs: u32,
}

/// The write carried by a pending operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingUpdate {
    /// Add to an attribute
    AdjustAttribute {
        /// Attribute to adjust
        attribute: Attribute,
        /// Amount to add
        value: f32,
    },
    /// Apply an exercise statistics increment
    ApplyExercise {
        /// Increment to apply
        delta: ExerciseDelta,
    },
}

/// An update that exhausted its retries and awaits a later sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// Owner of the update
    pub user_id: String,
    /// When the operation was queued
    pub recorded_at: DateTime<Utc>,
    /// The write to replay
    pub update: PendingUpdate,
}
