// ABOUTME: Achievement unlocking, listing, and leaderboard achievement counts
// ABOUTME: Compares exercise metrics to the catalog and awards a bonus on first unlock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::scoring::ScoringService;
use crate::logging::AppLogger;
use crate::resilience::retry_with_backoff;
use chrono::{DateTime, Days, NaiveDate, Utc};
use posefit_core::constants::achievements::{self as catalog, CATALOG};
use posefit_core::errors::{AppError, AppResult};
use posefit_core::models::{
    Achievement, AchievementCategory, AchievementMetric, DailyChallenge, UserIdentity,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Unlocks catalog achievements for users
pub struct AchievementService {
    scoring: Arc<ScoringService>,
    bonus_points: i64,
}

impl AchievementService {
    /// Create a service awarding `bonus_points` for each unlock
    #[must_use]
    pub const fn new(scoring: Arc<ScoringService>, bonus_points: i64) -> Self {
        Self {
            scoring,
            bonus_points,
        }
    }

    /// Unlock one achievement; returns whether this call unlocked it
    ///
    /// Already unlocked achievements are left untouched and earn nothing.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown identifier or if the store stays unreachable
    pub async fn unlock(&self, user: &UserIdentity, id: &str, value: u32) -> AppResult<bool> {
        let definition = catalog::find(id)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown achievement '{id}'")))?;
        let achievement = Achievement::unlocked(definition, value, Utc::now());

        let store = self.scoring.store();
        let newly_unlocked = retry_with_backoff("unlock_achievement", self.scoring.retry_policy(), || {
            store.unlock_achievement(&user.user_id, &achievement)
        })
        .await?;

        if newly_unlocked {
            AppLogger::log_achievement_unlocked(&user.user_id, id, value);
            self.scoring
                .award_bonus(user, self.bonus_points, true)
                .await;
        }
        Ok(newly_unlocked)
    }

    async fn unlock_satisfied(
        &self,
        user: &UserIdentity,
        checks: &[(AchievementMetric, u32)],
    ) -> AppResult<Vec<String>> {
        let mut unlocked = Vec::new();
        for &(metric, value) in checks {
            for definition in catalog::satisfied_by(metric, value) {
                if self.unlock(user, definition.id, value).await? {
                    unlocked.push(definition.id.to_owned());
                }
            }
        }
        Ok(unlocked)
    }

    /// Unlock push-up achievements for a lifetime count and a run of consecutive reps
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn check_push_ups(
        &self,
        user: &UserIdentity,
        total_reps: u32,
        consecutive: u32,
    ) -> AppResult<Vec<String>> {
        self.unlock_satisfied(
            user,
            &[
                (AchievementMetric::TotalReps, total_reps),
                (AchievementMetric::ConsecutiveReps, consecutive),
            ],
        )
        .await
    }

    /// Unlock plank achievements for a single hold
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn check_plank(&self, user: &UserIdentity, hold_secs: u32) -> AppResult<Vec<String>> {
        self.unlock_satisfied(user, &[(AchievementMetric::HoldSeconds, hold_secs)])
            .await
    }

    /// Unlock challenge achievements from the user's challenge history
    ///
    /// # Errors
    ///
    /// Returns an error if challenges cannot be loaded or the store stays unreachable
    pub async fn check_challenges(&self, user: &UserIdentity) -> AppResult<Vec<String>> {
        let challenges = self.scoring.store().list_challenges(&user.user_id).await?;
        let completed = challenges.iter().filter(|c| c.completed).count() as u32;
        let day_streak = completed_day_streak(&challenges);
        debug!(user.id = %user.user_id, completed, day_streak, "Checking challenge achievements");

        self.unlock_satisfied(
            user,
            &[
                (AchievementMetric::ChallengeDayStreak, day_streak),
                (AchievementMetric::ChallengesCompleted, completed),
            ],
        )
        .await
    }

    /// Push-up and plank catalog entries merged with the user's stored records
    ///
    /// Entries without a record are reported locked. Stored records of other
    /// categories follow the catalog entries.
    ///
    /// # Errors
    ///
    /// Returns an error if records cannot be loaded
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Achievement>> {
        let mut stored = self.scoring.store().list_achievements(user_id).await?;

        let mut merged: Vec<Achievement> = CATALOG
            .iter()
            .filter(|d| d.category != AchievementCategory::Challenge)
            .map(|definition| {
                stored
                    .iter()
                    .position(|a| a.id == definition.id)
                    .map_or_else(|| Achievement::locked(definition), |i| stored.swap_remove(i))
            })
            .collect();

        stored.sort_by(|a, b| a.id.cmp(&b.id));
        merged.extend(stored);
        Ok(merged)
    }

    /// Store locked records for catalog entries the user has no record of
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn initialize(&self, user_id: &str) -> AppResult<usize> {
        let locked: Vec<Achievement> = CATALOG.iter().map(Achievement::locked).collect();
        let store = self.scoring.store();
        retry_with_backoff("initialize_achievements", self.scoring.retry_policy(), || {
            store.insert_missing_achievements(user_id, &locked)
        })
        .await
    }

    /// Set the leaderboard achievement count to the number of unlocked records
    ///
    /// # Errors
    ///
    /// Returns an error if records cannot be loaded or the ranking does not exist
    pub async fn recount(&self, user_id: &str) -> AppResult<u32> {
        let store = self.scoring.store();
        let unlocked = store
            .list_achievements(user_id)
            .await?
            .iter()
            .filter(|a| a.unlocked)
            .count() as u32;
        retry_with_backoff("recount_achievements", self.scoring.retry_policy(), || {
            store.set_achievement_count(user_id, unlocked)
        })
        .await?;
        Ok(unlocked)
    }
}

/// Consecutive UTC days with a completed challenge, ending at the latest completion
#[must_use]
pub fn completed_day_streak(challenges: &[DailyChallenge]) -> u32 {
    let days: BTreeSet<NaiveDate> = challenges
        .iter()
        .filter(|c| c.completed)
        .filter_map(|c| c.completed_at)
        .map(|at: DateTime<Utc>| at.date_naive())
        .collect();

    let mut streak = 0;
    let mut expected = days.last().copied();
    for day in days.iter().rev() {
        if Some(*day) != expected {
            break;
        }
        streak += 1;
        expected = day.checked_sub_days(Days::new(1));
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use posefit_core::models::ExerciseType;
    use uuid::Uuid;

    fn completed_on(day: u32) -> DailyChallenge {
        let at = Utc.with_ymd_and_hms(2025, 4, day, 18, 0, 0).unwrap();
        DailyChallenge {
            id: Uuid::new_v4(),
            title: "Push-up Challenge".to_owned(),
            description: "Complete 10 push-ups".to_owned(),
            exercise: ExerciseType::PushUp,
            target: 10,
            points_reward: 20,
            completed: true,
            created_at: at,
            completed_at: Some(at),
            progress: 100,
        }
    }

    #[test]
    fn test_day_streak_counts_back_from_latest() {
        let challenges = vec![
            completed_on(1),
            completed_on(3),
            completed_on(4),
            completed_on(4),
            completed_on(5),
        ];
        assert_eq!(completed_day_streak(&challenges), 3);
    }

    #[test]
    fn test_day_streak_ignores_incomplete() {
        let mut open = completed_on(6);
        open.completed = false;
        let challenges = vec![completed_on(5), open];
        assert_eq!(completed_day_streak(&challenges), 1);
        assert_eq!(completed_day_streak(&[]), 0);
    }
}
