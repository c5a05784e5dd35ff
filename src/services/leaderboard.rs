// ABOUTME: Read side of the leaderboard: rankings ordered by total points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::storage::ProgressStore;
use posefit_core::constants::scoring::LEADERBOARD_LIMIT;
use posefit_core::errors::AppResult;
use posefit_core::models::UserRanking;
use std::sync::Arc;

/// Leaderboard queries
pub struct LeaderboardService {
    store: Arc<dyn ProgressStore>,
}

impl LeaderboardService {
    /// Create a leaderboard over a store
    #[must_use]
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Top rankings by total points, highest first; `None` uses the default limit
    ///
    /// # Errors
    ///
    /// Returns an error if rankings cannot be loaded
    pub async fn top(&self, limit: Option<usize>) -> AppResult<Vec<UserRanking>> {
        self.store
            .top_rankings(limit.unwrap_or(LEADERBOARD_LIMIT))
            .await
    }

    /// One-based position of a user, if ranked
    ///
    /// # Errors
    ///
    /// Returns an error if rankings cannot be loaded
    pub async fn position(&self, user_id: &str) -> AppResult<Option<usize>> {
        Ok(self
            .store
            .top_rankings(usize::MAX)
            .await?
            .iter()
            .position(|r| r.user_id == user_id)
            .map(|i| i + 1))
    }
}
