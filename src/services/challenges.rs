// ABOUTME: Daily challenge generation, progress tracking, and completion rewards
// ABOUTME: Keeps one open challenge per user and issues a new one when it is completed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::achievements::AchievementService;
use super::scoring::ScoringService;
use crate::resilience::retry_with_backoff;
use chrono::{DateTime, Utc};
use posefit_core::constants::challenges::{CRUNCH_TARGETS, PLANK_TARGETS, PUSHUP_TARGETS};
use posefit_core::errors::{AppError, AppResult};
use posefit_core::models::{DailyChallenge, ExerciseType, UserIdentity};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Points awarded for completing a challenge
#[must_use]
pub const fn reward_for(exercise: ExerciseType, target: u32) -> i64 {
    let target = target as i64;
    match exercise {
        ExerciseType::PushUp => target / 5 * 10,
        ExerciseType::Plank => target / 10 * 5,
        ExerciseType::Crunch => target / 10 * 8,
    }
}

/// Build an open challenge for an exercise and target
#[must_use]
pub fn build_challenge(exercise: ExerciseType, target: u32, now: DateTime<Utc>) -> DailyChallenge {
    let (title, description) = match exercise {
        ExerciseType::PushUp => (
            "Push-up Challenge",
            format!("Complete {target} push-ups in a single workout"),
        ),
        ExerciseType::Plank => ("Plank Challenge", format!("Hold a plank for {target} seconds")),
        ExerciseType::Crunch => (
            "Crunches Challenge",
            format!("Complete {target} crunches in a single workout"),
        ),
    };

    DailyChallenge {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description,
        exercise,
        target,
        points_reward: reward_for(exercise, target),
        completed: false,
        created_at: now,
        completed_at: None,
        progress: 0,
    }
}

/// Pick a random exercise and target
pub fn random_challenge<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DailyChallenge {
    let exercise = ExerciseType::ALL
        .choose(rng)
        .copied()
        .unwrap_or(ExerciseType::PushUp);
    let targets: &[u32] = match exercise {
        ExerciseType::PushUp => &PUSHUP_TARGETS,
        ExerciseType::Plank => &PLANK_TARGETS,
        ExerciseType::Crunch => &CRUNCH_TARGETS,
    };
    let target = targets.choose(rng).copied().unwrap_or(targets[0]);
    build_challenge(exercise, target, now)
}

/// Daily challenge lifecycle for users
pub struct ChallengeService {
    scoring: Arc<ScoringService>,
    achievements: Arc<AchievementService>,
}

impl ChallengeService {
    /// Create a challenge service
    #[must_use]
    pub const fn new(scoring: Arc<ScoringService>, achievements: Arc<AchievementService>) -> Self {
        Self {
            scoring,
            achievements,
        }
    }

    /// Store a new random challenge
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn generate(&self, user_id: &str) -> AppResult<DailyChallenge> {
        let challenge = random_challenge(&mut rand::thread_rng(), Utc::now());
        self.insert(user_id, challenge).await
    }

    /// Store a specific challenge
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn insert(&self, user_id: &str, challenge: DailyChallenge) -> AppResult<DailyChallenge> {
        let store = self.scoring.store();
        retry_with_backoff("insert_challenge", self.scoring.retry_policy(), || {
            store.insert_challenge(user_id, &challenge)
        })
        .await?;
        info!(
            user.id = %user_id,
            challenge.id = %challenge.id,
            exercise = %challenge.exercise,
            target = challenge.target,
            "Generated daily challenge"
        );
        Ok(challenge)
    }

    /// Generate a challenge only if the user has no open one
    ///
    /// # Errors
    ///
    /// Returns an error if challenges cannot be loaded or stored
    pub async fn check_and_generate(&self, user_id: &str) -> AppResult<Option<DailyChallenge>> {
        if self.current(user_id).await?.is_some() {
            debug!(user.id = %user_id, "Open challenge exists, not generating");
            return Ok(None);
        }
        self.generate(user_id).await.map(Some)
    }

    /// The user's first open challenge
    ///
    /// # Errors
    ///
    /// Returns an error if challenges cannot be loaded
    pub async fn current(&self, user_id: &str) -> AppResult<Option<DailyChallenge>> {
        Ok(self
            .scoring
            .store()
            .list_challenges(user_id)
            .await?
            .into_iter()
            .find(|c| !c.completed))
    }

    /// Every challenge, open ones first
    ///
    /// # Errors
    ///
    /// Returns an error if challenges cannot be loaded
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<DailyChallenge>> {
        let mut challenges = self.scoring.store().list_challenges(user_id).await?;
        challenges.sort_by_key(|c| c.completed);
        Ok(challenges)
    }

    /// Record progress towards the open challenge for `exercise`
    ///
    /// `count` is repetitions, or seconds for timed exercises. Completes the
    /// challenge when the target is met. Returns the stored progress, or
    /// `None` when the open challenge is for another exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the store stays unreachable
    pub async fn update_progress(
        &self,
        user: &UserIdentity,
        exercise: ExerciseType,
        count: u32,
    ) -> AppResult<Option<u8>> {
        let Some(challenge) = self.current(&user.user_id).await? else {
            return Ok(None);
        };
        if challenge.exercise != exercise {
            return Ok(None);
        }

        let progress = challenge.progress_for(count);
        if progress != challenge.progress {
            let store = self.scoring.store();
            retry_with_backoff("challenge_progress", self.scoring.retry_policy(), || {
                store.update_challenge_progress(&user.user_id, challenge.id, progress)
            })
            .await?;
            debug!(user.id = %user.user_id, challenge.id = %challenge.id, progress, "Challenge progress");
        }

        if challenge.is_met_by(count) {
            self.complete(user, challenge.id).await?;
        }
        Ok(Some(progress))
    }

    /// Complete a challenge and pay its reward; returns false if it was already completed
    ///
    /// Also checks challenge achievements and issues the next challenge.
    ///
    /// # Errors
    ///
    /// Returns an error if the challenge does not exist or the store stays unreachable
    pub async fn complete(&self, user: &UserIdentity, challenge_id: Uuid) -> AppResult<bool> {
        let store = self.scoring.store();
        let challenge = store
            .list_challenges(&user.user_id)
            .await?
            .into_iter()
            .find(|c| c.id == challenge_id)
            .ok_or_else(|| AppError::not_found(format!("Challenge {challenge_id}")))?;

        let newly_completed = retry_with_backoff("complete_challenge", self.scoring.retry_policy(), || {
            store.complete_challenge(&user.user_id, challenge_id, Utc::now())
        })
        .await?;
        if !newly_completed {
            return Ok(false);
        }

        info!(
            user.id = %user.user_id,
            challenge.id = %challenge_id,
            reward = challenge.points_reward,
            "Challenge completed"
        );
        self.scoring
            .award_bonus(user, challenge.points_reward, false)
            .await;
        self.achievements.check_challenges(user).await?;
        self.check_and_generate(&user.user_id).await?;
        Ok(true)
    }
}
