// ABOUTME: Applies tracker awards to user progress with retries and an offline fallback
// ABOUTME: Updates profile stats, attributes, the leaderboard, session history, and streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scoring Service
//!
//! Every store write goes through [`retry_with_backoff`]. Attribute and
//! exercise increments that still fail are queued in the
//! [`PendingOperationQueue`] and replayed by [`ScoringService::sync_pending`];
//! the remaining writes (leaderboard, personal bests, history) are logged and
//! dropped.

use super::streak::next_streak;
use crate::logging::AppLogger;
use crate::resilience::{retry_with_backoff, RetryPolicy};
use crate::storage::{PendingOperationQueue, ProgressStore};
use chrono::{DateTime, Utc};
use posefit_core::constants::scoring::{STAMINA_PER_PLANK_INTERVAL, STRENGTH_PER_AWARD};
use posefit_core::errors::AppResult;
use posefit_core::models::{
    Attribute, ExerciseDelta, ExerciseType, LeaderboardDelta, PendingOperation, PendingUpdate,
    SessionRecord, UserIdentity, UserProfile,
};
use posefit_detection::SessionSummary;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Writes progress earned by trackers
pub struct ScoringService {
    store: Arc<dyn ProgressStore>,
    pending: Arc<PendingOperationQueue>,
    retry: RetryPolicy,
}

impl ScoringService {
    /// Create a scoring service over a store and an offline queue
    #[must_use]
    pub fn new(
        store: Arc<dyn ProgressStore>,
        pending: Arc<PendingOperationQueue>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            pending,
            retry,
        }
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ProgressStore> {
        &self.store
    }

    /// Retry policy applied to every write
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Create the default profile for a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable after retries
    pub async fn ensure_profile(&self, user: &UserIdentity) -> AppResult<UserProfile> {
        retry_with_backoff("ensure_profile", &self.retry, || {
            self.store.ensure_profile(&user.user_id, &user.display_name)
        })
        .await
    }

    /// Run a write with retries; failures are logged and reported as `None`
    pub(crate) async fn persist<T, F, Fut>(&self, operation: &str, user_id: &str, f: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match retry_with_backoff(operation, &self.retry, f).await {
            Ok(value) => {
                AppLogger::log_store_operation(operation, user_id, true);
                Some(value)
            }
            Err(e) => {
                AppLogger::log_store_operation(operation, user_id, false);
                warn!(user.id = %user_id, operation, error = %e, "Dropping progress write");
                None
            }
        }
    }

    /// Apply a profile update, queueing it locally if the store stays unreachable
    async fn persist_or_queue(&self, user_id: &str, update: PendingUpdate) -> AppResult<()> {
        let result = retry_with_backoff(update_name(&update), &self.retry, || {
            apply_update(self.store.as_ref(), user_id, &update)
        })
        .await;

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_retryable() => {
                warn!(user.id = %user_id, error = %e, "Store unreachable, queueing update for later sync");
                self.pending
                    .push(PendingOperation {
                        user_id: user_id.to_owned(),
                        recorded_at: Utc::now(),
                        update,
                    })
                    .await
            }
            Err(e) => {
                warn!(user.id = %user_id, error = %e, "Dropping progress update");
                Ok(())
            }
        }
    }

    /// Credit a push-up award
    ///
    /// # Errors
    ///
    /// Returns an error only if a failed write could not be queued locally
    pub async fn award_push_ups(
        &self,
        user: &UserIdentity,
        points: i64,
        reps: u32,
        max_consecutive: u32,
        calories: f64,
    ) -> AppResult<()> {
        let user_id = user.user_id.as_str();
        let delta = ExerciseDelta::PushUp {
            reps,
            points,
            calories,
        };
        self.persist_or_queue(user_id, PendingUpdate::ApplyExercise { delta })
            .await?;

        let ranking = LeaderboardDelta::exercise(&user.display_name, ExerciseType::PushUp, points);
        self.persist("leaderboard_update", user_id, || {
            self.store.apply_leaderboard_delta(user_id, &ranking)
        })
        .await;

        self.persist("best_streak", user_id, || {
            self.store.raise_best_streak(user_id, max_consecutive)
        })
        .await;

        self.persist_or_queue(
            user_id,
            PendingUpdate::AdjustAttribute {
                attribute: Attribute::Strength,
                value: STRENGTH_PER_AWARD,
            },
        )
        .await?;

        AppLogger::log_points_awarded(user_id, ExerciseType::PushUp.as_str(), points);
        Ok(())
    }

    /// Credit plank intervals held without a break
    ///
    /// # Errors
    ///
    /// Returns an error only if a failed write could not be queued locally
    pub async fn award_plank_intervals(
        &self,
        user: &UserIdentity,
        intervals: u32,
        points: i64,
        seconds: u32,
    ) -> AppResult<()> {
        let user_id = user.user_id.as_str();
        let delta = ExerciseDelta::Plank { points, seconds };
        self.persist_or_queue(user_id, PendingUpdate::ApplyExercise { delta })
            .await?;

        let ranking = LeaderboardDelta::exercise(&user.display_name, ExerciseType::Plank, points);
        self.persist("leaderboard_update", user_id, || {
            self.store.apply_leaderboard_delta(user_id, &ranking)
        })
        .await;

        self.persist_or_queue(
            user_id,
            PendingUpdate::AdjustAttribute {
                attribute: Attribute::Stamina,
                value: STAMINA_PER_PLANK_INTERVAL * intervals as f32,
            },
        )
        .await?;

        AppLogger::log_points_awarded(user_id, ExerciseType::Plank.as_str(), points);
        Ok(())
    }

    /// Credit bonus points to the total and the leaderboard
    pub async fn award_bonus(&self, user: &UserIdentity, points: i64, achievement: bool) {
        let user_id = user.user_id.as_str();
        self.persist("add_total_points", user_id, || {
            self.store.add_total_points(user_id, points)
        })
        .await;

        let ranking = if achievement {
            LeaderboardDelta::achievement(&user.display_name, points)
        } else {
            LeaderboardDelta::bonus(&user.display_name, points)
        };
        self.persist("leaderboard_update", user_id, || {
            self.store.apply_leaderboard_delta(user_id, &ranking)
        })
        .await;
    }

    /// Raise the stored best plank hold; returns the stored best if the write succeeded
    pub async fn record_plank_duration(&self, user_id: &str, duration_secs: u32) -> Option<u32> {
        self.persist("best_plank_duration", user_id, || {
            self.store.raise_best_plank_duration(user_id, duration_secs)
        })
        .await
    }

    /// Store a finished session and update the workout streak
    ///
    /// Repetitions the tracker never awarded are credited without points so
    /// the lifetime count matches the history.
    ///
    /// # Errors
    ///
    /// Returns an error only if a failed write could not be queued locally
    pub async fn save_session(
        &self,
        user: &UserIdentity,
        summary: &SessionSummary,
        now: DateTime<Utc>,
    ) -> AppResult<SessionRecord> {
        let user_id = user.user_id.as_str();

        if summary.exercise == ExerciseType::PushUp && summary.unawarded_reps > 0 {
            let per_rep = if summary.count > 0 {
                summary.calories_burned / f64::from(summary.count)
            } else {
                0.0
            };
            let delta = ExerciseDelta::PushUp {
                reps: summary.unawarded_reps,
                points: 0,
                calories: per_rep * f64::from(summary.unawarded_reps),
            };
            debug!(user.id = %user_id, reps = summary.unawarded_reps, "Crediting unawarded repetitions");
            self.persist_or_queue(user_id, PendingUpdate::ApplyExercise { delta })
                .await?;
        }

        let record = SessionRecord {
            id: Uuid::new_v4(),
            exercise: summary.exercise,
            recorded_at: now,
            count: summary.count,
            points_earned: summary.points_earned,
            max_consecutive_reps: summary.max_consecutive_reps,
            calories_burned: summary.calories_burned,
            duration_secs: summary.duration_secs,
        };
        self.persist("record_session", user_id, || {
            self.store.record_session(user_id, &record)
        })
        .await;

        self.update_workout_streak(user_id, now).await;

        AppLogger::log_session_saved(
            user_id,
            summary.exercise.as_str(),
            summary.count,
            summary.duration_secs,
        );
        Ok(record)
    }

    async fn update_workout_streak(&self, user_id: &str, now: DateTime<Utc>) {
        let profile = match self.store.get_profile(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(user.id = %user_id, "No profile, skipping workout streak");
                return;
            }
            Err(e) => {
                warn!(user.id = %user_id, error = %e, "Failed to load profile for workout streak");
                return;
            }
        };

        let analytics = profile.analytics;
        let Some(update) = next_streak(analytics.last_workout, analytics.workout_streak, now) else {
            debug!(user.id = %user_id, "Already worked out today, streak unchanged");
            return;
        };

        self.persist("workout_streak", user_id, || {
            self.store
                .set_workout_state(user_id, update.last_workout, update.streak)
        })
        .await;
        info!(user.id = %user_id, streak = update.streak, "Workout streak updated");
    }

    /// Replay queued updates for `user_id`; returns how many were applied
    ///
    /// Updates that fail again are put back in the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the local queue cannot be read or written
    pub async fn sync_pending(&self, user_id: &str) -> AppResult<usize> {
        let queued = self.pending.take_for_user(user_id).await?;
        if queued.is_empty() {
            return Ok(0);
        }

        let mut applied = 0;
        let mut failed = Vec::new();
        for operation in queued {
            let result = retry_with_backoff("sync_pending", &self.retry, || {
                apply_update(self.store.as_ref(), user_id, &operation.update)
            })
            .await;
            match result {
                Ok(()) => applied += 1,
                Err(e) if e.is_retryable() => failed.push(operation),
                Err(e) => warn!(user.id = %user_id, error = %e, "Discarding pending update"),
            }
        }

        let remaining = failed.len();
        self.pending.restore(failed).await?;
        info!(user.id = %user_id, applied, remaining, "Synced pending operations");
        Ok(applied)
    }
}

const fn update_name(update: &PendingUpdate) -> &'static str {
    match update {
        PendingUpdate::AdjustAttribute { .. } => "adjust_attribute",
        PendingUpdate::ApplyExercise { .. } => "apply_exercise",
    }
}

async fn apply_update(
    store: &dyn ProgressStore,
    user_id: &str,
    update: &PendingUpdate,
) -> AppResult<()> {
    match update {
        PendingUpdate::AdjustAttribute { attribute, value } => {
            store.adjust_attribute(user_id, *attribute, *value).await?;
        }
        PendingUpdate::ApplyExercise { delta } => {
            store.apply_exercise_delta(user_id, delta).await?;
        }
    }
    Ok(())
}
