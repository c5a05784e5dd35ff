// ABOUTME: Catalog of unlockable achievements with their thresholds
// ABOUTME: Lookup helpers by identifier and by category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{AchievementCategory, AchievementDefinition, AchievementMetric};

/// Every achievement that can be unlocked
pub const CATALOG: [AchievementDefinition; 9] = [
    AchievementDefinition {
        id: "pushup_beginner",
        title: "Push-up Beginner",
        description: "Complete 10 push-ups",
        category: AchievementCategory::PushUp,
        metric: AchievementMetric::TotalReps,
        threshold: 10,
    },
    AchievementDefinition {
        id: "pushup_intermediate",
        title: "Push-up Intermediate",
        description: "Complete 50 push-ups",
        category: AchievementCategory::PushUp,
        metric: AchievementMetric::TotalReps,
        threshold: 50,
    },
    AchievementDefinition {
        id: "pushup_master",
        title: "Push-up Master",
        description: "Complete 100 push-ups",
        category: AchievementCategory::PushUp,
        metric: AchievementMetric::TotalReps,
        threshold: 100,
    },
    AchievementDefinition {
        id: "pushup_streak_10",
        title: "Push-up Streak",
        description: "10 push-ups in a row",
        category: AchievementCategory::PushUp,
        metric: AchievementMetric::ConsecutiveReps,
        threshold: 10,
    },
    AchievementDefinition {
        id: "plank_beginner",
        title: "Plank Beginner",
        description: "Hold a plank for 30 seconds",
        category: AchievementCategory::Plank,
        metric: AchievementMetric::HoldSeconds,
        threshold: 30,
    },
    AchievementDefinition {
        id: "plank_intermediate",
        title: "Plank Intermediate",
        description: "Hold a plank for 60 seconds",
        category: AchievementCategory::Plank,
        metric: AchievementMetric::HoldSeconds,
        threshold: 60,
    },
    AchievementDefinition {
        id: "plank_master",
        title: "Plank Master",
        description: "Hold a plank for 120 seconds",
        category: AchievementCategory::Plank,
        metric: AchievementMetric::HoldSeconds,
        threshold: 120,
    },
    AchievementDefinition {
        id: "challenge_streak_3",
        title: "Challenge Streak",
        description: "Complete 3 daily challenges in a row",
        category: AchievementCategory::Challenge,
        metric: AchievementMetric::ChallengeDayStreak,
        threshold: 3,
    },
    AchievementDefinition {
        id: "challenge_master",
        title: "Challenge Master",
        description: "Complete 10 daily challenges",
        category: AchievementCategory::Challenge,
        metric: AchievementMetric::ChallengesCompleted,
        threshold: 10,
    },
];

/// Find a catalog entry by identifier
#[must_use]
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    CATALOG.iter().find(|definition| definition.id == id)
}

/// Catalog entries in one category
pub fn in_category(
    category: AchievementCategory,
) -> impl Iterator<Item = &'static AchievementDefinition> {
    CATALOG
        .iter()
        .filter(move |definition| definition.category == category)
}

/// Catalog entries satisfied by `value` of `metric`
pub fn satisfied_by(
    metric: AchievementMetric,
    value: u32,
) -> impl Iterator<Item = &'static AchievementDefinition> {
    CATALOG
        .iter()
        .filter(move |definition| definition.is_satisfied_by(metric, value))
}
