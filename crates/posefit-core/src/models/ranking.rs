// ABOUTME: Leaderboard ranking row aggregated from per-user point totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseType;
use serde::{Deserialize, Serialize};

/// One user's leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRanking {
    /// Owner of the entry
    pub user_id: String,
    /// Name shown on the leaderboard
    pub user_name: String,
    /// Points from push-ups
    pub push_up_points: i64,
    /// Points from crunches
    pub crunch_points: i64,
    /// Points from planks
    pub plank_points: i64,
    /// Points from every source; the sort key
    pub total_points: i64,
    /// Unlocked achievements
    pub achievement_count: u32,
}

impl UserRanking {
    /// Points earned from a single exercise
    #[must_use]
    pub const fn exercise_points(&self, exercise: ExerciseType) -> i64 {
        match exercise {
            ExerciseType::PushUp => self.push_up_points,
            ExerciseType::Plank => self.plank_points,
            ExerciseType::Crunch => self.crunch_points,
        }
    }
}

/// Increment applied to a leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardDelta {
    /// Display name to store with the entry
    pub user_name: String,
    /// Exercise whose per-exercise points grow, if any
    pub exercise: Option<ExerciseType>,
    /// Points added to the exercise column and the total
    pub points: i64,
    /// Newly unlocked achievements
    pub achievements: u32,
}

impl LeaderboardDelta {
    /// Points earned from an exercise
    #[must_use]
    pub fn exercise(user_name: impl Into<String>, exercise: ExerciseType, points: i64) -> Self {
        Self {
            user_name: user_name.into(),
            exercise: Some(exercise),
            points,
            achievements: 0,
        }
    }

    /// Bonus points not tied to an exercise, such as a challenge reward
    #[must_use]
    pub fn bonus(user_name: impl Into<String>, points: i64) -> Self {
        Self {
            user_name: user_name.into(),
            exercise: None,
            points,
            achievements: 0,
        }
    }

    /// One unlocked achievement and its bonus
    #[must_use]
    pub fn achievement(user_name: impl Into<String>, points: i64) -> Self {
        Self {
            achievements: 1,
            ..Self::bonus(user_name, points)
        }
    }

    /// Apply this delta to a ranking row
    pub fn apply_to(&self, ranking: &mut UserRanking) {
        ranking.user_name.clone_from(&self.user_name);
        ranking.total_points += self.points;
        ranking.achievement_count += self.achievements;
        match self.exercise {
            Some(ExerciseType::PushUp) => ranking.push_up_points += self.points,
            Some(ExerciseType::Plank) => ranking.plank_points += self.points,
            Some(ExerciseType::Crunch) => ranking.crunch_points += self.points,
            None => {}
        }
    }
}
