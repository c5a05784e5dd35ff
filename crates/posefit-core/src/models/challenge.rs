// ABOUTME: Daily challenge record: a target for one exercise with a point reward
// ABOUTME: Progress is tracked as a percentage and completion stamps the finish time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated daily challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Exercise to perform
    pub exercise: ExerciseType,
    /// Repetitions, or seconds for timed exercises
    pub target: u32,
    /// Points granted on completion
    pub points_reward: i64,
    /// Whether the challenge was completed
    pub completed: bool,
    /// When the challenge was generated
    pub created_at: DateTime<Utc>,
    /// When the challenge was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion percentage, 0 to 100
    pub progress: u8,
}

impl DailyChallenge {
    /// Progress percentage reached with `count` repetitions or seconds
    #[must_use]
    pub fn progress_for(&self, count: u32) -> u8 {
        if self.target == 0 {
            return 100;
        }
        let percent = u64::from(count) * 100 / u64::from(self.target);
        percent.min(100) as u8
    }

    /// Whether `count` meets the target
    #[must_use]
    pub const fn is_met_by(&self, count: u32) -> bool {
        count >= self.target
    }
}
