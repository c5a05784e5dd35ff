// ABOUTME: Gamification service layer built on the progress store
// ABOUTME: Scoring, achievements, daily challenges, leaderboard, and workout streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services turn tracker events into progress. They share one
//! [`ProgressStore`] and one retry policy; [`Services`] wires them together
//! from a [`PosefitConfig`].

/// Achievement unlocking and listing
pub mod achievements;

/// Daily challenge lifecycle
pub mod challenges;

/// Leaderboard queries
pub mod leaderboard;

/// Points, attributes, session history, and offline sync
pub mod scoring;

/// Workout streak calculation
pub mod streak;

pub use achievements::AchievementService;
pub use challenges::ChallengeService;
pub use leaderboard::LeaderboardService;
pub use scoring::ScoringService;

use crate::config::PosefitConfig;
use crate::storage::{open_store, PendingOperationQueue, ProgressStore};
use posefit_core::errors::AppResult;
use posefit_detection::{DetectionThresholds, ScoringRules};
use std::sync::Arc;

/// Every service, sharing one store
#[derive(Clone)]
pub struct Services {
    /// Points and session persistence
    pub scoring: Arc<ScoringService>,
    /// Achievement unlocking
    pub achievements: Arc<AchievementService>,
    /// Daily challenges
    pub challenges: Arc<ChallengeService>,
    /// Leaderboard queries
    pub leaderboard: Arc<LeaderboardService>,
    /// Thresholds handed to new trackers
    pub detection: DetectionThresholds,
    /// Award rules handed to new trackers
    pub rules: ScoringRules,
}

impl Services {
    /// Wire services over an opened store
    #[must_use]
    pub fn new(
        store: Arc<dyn ProgressStore>,
        pending: Arc<PendingOperationQueue>,
        config: &PosefitConfig,
    ) -> Self {
        let scoring = Arc::new(ScoringService::new(store.clone(), pending, config.retry));
        let achievements = Arc::new(AchievementService::new(
            scoring.clone(),
            config.achievement_points,
        ));
        let challenges = Arc::new(ChallengeService::new(scoring.clone(), achievements.clone()));
        let leaderboard = Arc::new(LeaderboardService::new(store));
        Self {
            scoring,
            achievements,
            challenges,
            leaderboard,
            detection: config.detection,
            rules: config.scoring,
        }
    }

    /// Open the configured store and pending queue, then wire services
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened
    pub async fn from_config(config: &PosefitConfig) -> AppResult<Self> {
        let store = open_store(&config.database).await?;
        let pending = Arc::new(PendingOperationQueue::new(config.pending_ops_path.clone()));
        Ok(Self::new(store, pending, config))
    }
}
