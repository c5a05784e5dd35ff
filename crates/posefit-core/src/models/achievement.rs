// ABOUTME: Achievement catalog definitions and per-user unlock records
// ABOUTME: A definition names a threshold on an exercise metric; a record tracks whether it was reached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Group an achievement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Push-up milestones
    PushUp,
    /// Plank milestones
    Plank,
    /// Daily challenge milestones
    Challenge,
}

impl AchievementCategory {
    /// Stable wire name, stored alongside unlock records
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PushUp => "pushup",
            Self::Plank => "plank",
            Self::Challenge => "challenge",
        }
    }
}

impl FromStr for AchievementCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pushup" => Ok(Self::PushUp),
            "plank" => Ok(Self::Plank),
            "challenge" => Ok(Self::Challenge),
            other => Err(AppError::invalid_input(format!(
                "Unknown achievement category '{other}'"
            ))),
        }
    }
}

/// Counted metric an achievement threshold is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementMetric {
    /// Lifetime push-up repetitions
    TotalReps,
    /// Push-ups in a row within one session
    ConsecutiveReps,
    /// Seconds of a single plank hold
    HoldSeconds,
    /// Consecutive days with a completed daily challenge
    ChallengeDayStreak,
    /// Daily challenges completed overall
    ChallengesCompleted,
}

/// Static description of an unlockable milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    /// Stable identifier
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Display description
    pub description: &'static str,
    /// Group the achievement belongs to
    pub category: AchievementCategory,
    /// Metric compared against the threshold
    pub metric: AchievementMetric,
    /// Value the metric must reach
    pub threshold: u32,
}

impl AchievementDefinition {
    /// Whether `value` of `metric` satisfies this definition
    #[must_use]
    pub fn is_satisfied_by(&self, metric: AchievementMetric, value: u32) -> bool {
        self.metric == metric && value >= self.threshold
    }
}

/// A user's state for one achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Group the achievement belongs to
    pub category: AchievementCategory,
    /// Whether the milestone was reached
    pub unlocked: bool,
    /// When the milestone was reached
    pub unlocked_at: Option<DateTime<Utc>>,
    /// Metric value recorded at unlock time
    pub value: u32,
}

impl Achievement {
    /// Locked record for a catalog entry
    #[must_use]
    pub fn locked(definition: &AchievementDefinition) -> Self {
        Self {
            id: definition.id.to_owned(),
            title: definition.title.to_owned(),
            description: definition.description.to_owned(),
            category: definition.category,
            unlocked: false,
            unlocked_at: None,
            value: 0,
        }
    }

    /// Unlocked record for a catalog entry
    #[must_use]
    pub fn unlocked(definition: &AchievementDefinition, value: u32, at: DateTime<Utc>) -> Self {
        Self {
            unlocked: true,
            unlocked_at: Some(at),
            value,
            ..Self::locked(definition)
        }
    }
}
