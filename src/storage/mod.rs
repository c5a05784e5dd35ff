// ABOUTME: Progress storage abstraction with pluggable in-memory and SQLite backends
// ABOUTME: Every write the scoring layer performs goes through the ProgressStore trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress Storage
//!
//! [`ProgressStore`] is the seam between the gamification services and the
//! database. Increments are expressed as deltas so a backend can apply them
//! atomically, and "raise to at least" operations return the stored value so
//! callers can tell whether a personal best was set.

/// In-memory store for tests and ephemeral sessions
pub mod memory;
/// Local file queue for writes that exhausted their retries
pub mod pending;
/// `SQLite` store
pub mod sqlite;

pub use memory::InMemoryStore;
pub use pending::PendingOperationQueue;
pub use sqlite::SqliteStore;

use crate::config::DatabaseUrl;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use posefit_core::errors::AppResult;
use posefit_core::models::{
    Achievement, Attribute, DailyChallenge, ExerciseDelta, ExerciseType, LeaderboardDelta,
    SessionRecord, UserProfile, UserRanking,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Storage backend for user progress
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Create the default profile structure if the user has none; returns the stored profile
    async fn ensure_profile(&self, user_id: &str, display_name: &str) -> AppResult<UserProfile>;

    /// Load a profile
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    /// Apply an exercise increment and add its points to the total
    async fn apply_exercise_delta(&self, user_id: &str, delta: &ExerciseDelta) -> AppResult<()>;

    /// Add points to the total; returns the new total
    async fn add_total_points(&self, user_id: &str, points: i64) -> AppResult<i64>;

    /// Add to an attribute; returns the new value
    async fn adjust_attribute(
        &self,
        user_id: &str,
        attribute: Attribute,
        amount: f32,
    ) -> AppResult<f32>;

    /// Raise the best push-up streak to at least `streak`; returns the stored best
    async fn raise_best_streak(&self, user_id: &str, streak: u32) -> AppResult<u32>;

    /// Raise the best plank hold to at least `duration_secs`; returns the stored best
    async fn raise_best_plank_duration(&self, user_id: &str, duration_secs: u32)
        -> AppResult<u32>;

    /// Store the last workout time and the workout streak
    async fn set_workout_state(
        &self,
        user_id: &str,
        last_workout: DateTime<Utc>,
        streak: u32,
    ) -> AppResult<()>;

    /// Append a finished session to the history
    async fn record_session(&self, user_id: &str, record: &SessionRecord) -> AppResult<()>;

    /// Session history, newest first
    async fn list_sessions(
        &self,
        user_id: &str,
        exercise: Option<ExerciseType>,
    ) -> AppResult<Vec<SessionRecord>>;

    /// Apply an increment to the user's leaderboard entry, creating it if needed
    async fn apply_leaderboard_delta(&self, user_id: &str, delta: &LeaderboardDelta)
        -> AppResult<()>;

    /// Overwrite the leaderboard achievement count
    async fn set_achievement_count(&self, user_id: &str, count: u32) -> AppResult<()>;

    /// Leaderboard rows by total points, highest first
    async fn top_rankings(&self, limit: usize) -> AppResult<Vec<UserRanking>>;

    /// Store an unlocked achievement unless it is already unlocked; returns
    /// whether this call unlocked it
    async fn unlock_achievement(&self, user_id: &str, achievement: &Achievement)
        -> AppResult<bool>;

    /// Store locked records for achievements the user has no record of;
    /// returns how many were added
    async fn insert_missing_achievements(
        &self,
        user_id: &str,
        locked: &[Achievement],
    ) -> AppResult<usize>;

    /// Every stored achievement record
    async fn list_achievements(&self, user_id: &str) -> AppResult<Vec<Achievement>>;

    /// Store a new challenge
    async fn insert_challenge(&self, user_id: &str, challenge: &DailyChallenge) -> AppResult<()>;

    /// Every challenge, oldest first
    async fn list_challenges(&self, user_id: &str) -> AppResult<Vec<DailyChallenge>>;

    /// Set the progress percentage of a challenge
    async fn update_challenge_progress(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        progress: u8,
    ) -> AppResult<()>;

    /// Mark a challenge completed; returns false if it already was
    async fn complete_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}

/// Open the store selected by a database URL
///
/// # Errors
///
/// Returns an error if the `SQLite` database cannot be opened or migrated
pub async fn open_store(url: &DatabaseUrl) -> AppResult<Arc<dyn ProgressStore>> {
    if let DatabaseUrl::SQLite { path } = url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    match url.to_connection_string() {
        None => {
            info!("Using in-memory progress store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        Some(connection_string) => {
            info!(database = %connection_string, "Opening SQLite progress store");
            Ok(Arc::new(SqliteStore::connect(&connection_string).await?))
        }
    }
}
