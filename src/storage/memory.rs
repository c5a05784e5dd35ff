// ABOUTME: In-memory progress store backed by hash maps behind an async RwLock
// ABOUTME: Supports injected write failures so retry and offline paths can be exercised
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::ProgressStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use posefit_core::errors::{AppError, AppResult};
use posefit_core::models::{
    Achievement, Attribute, DailyChallenge, ExerciseDelta, ExerciseType, LeaderboardDelta,
    SessionRecord, UserProfile, UserRanking,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct StoreState {
    profiles: HashMap<String, UserProfile>,
    sessions: HashMap<String, Vec<SessionRecord>>,
    rankings: HashMap<String, UserRanking>,
    achievements: HashMap<String, BTreeMap<String, Achievement>>,
    challenges: HashMap<String, Vec<DailyChallenge>>,
}

impl StoreState {
    fn profile_mut(&mut self, user_id: &str) -> AppResult<&mut UserProfile> {
        self.profiles
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))
    }

    fn challenge_mut(&mut self, user_id: &str, challenge_id: Uuid) -> AppResult<&mut DailyChallenge> {
        self.challenges
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|c| c.id == challenge_id))
            .ok_or_else(|| AppError::not_found(format!("Challenge {challenge_id}")))
    }
}

/// Process-local progress store
///
/// Clones share the same state. Uses `Arc<RwLock<..>>` so concurrent readers
/// (leaderboard queries) do not block each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    failing_writes: Arc<AtomicU32>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` writes fail with a retryable "unavailable" error
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if injected {
            return Err(AppError::unavailable("Store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryStore {
    async fn ensure_profile(&self, user_id: &str, display_name: &str) -> AppResult<UserProfile> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let profile = state
            .profiles
            .entry(user_id.to_owned())
            .or_insert_with(|| UserProfile::new(user_id, display_name));
        Ok(profile.clone())
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn apply_exercise_delta(&self, user_id: &str, delta: &ExerciseDelta) -> AppResult<()> {
        self.check_writable()?;
        self.state.write().await.profile_mut(user_id)?.apply(delta);
        Ok(())
    }

    async fn add_total_points(&self, user_id: &str, points: i64) -> AppResult<i64> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let profile = state.profile_mut(user_id)?;
        profile.total_points += points;
        Ok(profile.total_points)
    }

    async fn adjust_attribute(
        &self,
        user_id: &str,
        attribute: Attribute,
        amount: f32,
    ) -> AppResult<f32> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let value = state.profile_mut(user_id)?.attributes.get_mut(attribute);
        *value += amount;
        Ok(*value)
    }

    async fn raise_best_streak(&self, user_id: &str, streak: u32) -> AppResult<u32> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let stats = &mut state.profile_mut(user_id)?.push_ups;
        stats.best_streak = stats.best_streak.max(streak);
        Ok(stats.best_streak)
    }

    async fn raise_best_plank_duration(
        &self,
        user_id: &str,
        duration_secs: u32,
    ) -> AppResult<u32> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let stats = &mut state.profile_mut(user_id)?.plank;
        stats.best_duration_secs = stats.best_duration_secs.max(duration_secs);
        Ok(stats.best_duration_secs)
    }

    async fn set_workout_state(
        &self,
        user_id: &str,
        last_workout: DateTime<Utc>,
        streak: u32,
    ) -> AppResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let analytics = &mut state.profile_mut(user_id)?.analytics;
        analytics.last_workout = Some(last_workout);
        analytics.workout_streak = streak;
        Ok(())
    }

    async fn record_session(&self, user_id: &str, record: &SessionRecord) -> AppResult<()> {
        self.check_writable()?;
        self.state
            .write()
            .await
            .sessions
            .entry(user_id.to_owned())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        exercise: Option<ExerciseType>,
    ) -> AppResult<Vec<SessionRecord>> {
        let state = self.state.read().await;
        let mut sessions: Vec<SessionRecord> = state
            .sessions
            .get(user_id)
            .map(|list| {
                list.iter()
                    .filter(|s| exercise.is_none() || exercise == Some(s.exercise))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        sessions.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(sessions)
    }

    async fn apply_leaderboard_delta(
        &self,
        user_id: &str,
        delta: &LeaderboardDelta,
    ) -> AppResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let ranking = state
            .rankings
            .entry(user_id.to_owned())
            .or_insert_with(|| UserRanking {
                user_id: user_id.to_owned(),
                ..UserRanking::default()
            });
        delta.apply_to(ranking);
        Ok(())
    }

    async fn set_achievement_count(&self, user_id: &str, count: u32) -> AppResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let ranking = state
            .rankings
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("Ranking for user {user_id}")))?;
        ranking.achievement_count = count;
        Ok(())
    }

    async fn top_rankings(&self, limit: usize) -> AppResult<Vec<UserRanking>> {
        let state = self.state.read().await;
        let mut rankings: Vec<UserRanking> = state.rankings.values().cloned().collect();
        rankings.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.user_name.cmp(&b.user_name))
        });
        rankings.truncate(limit);
        Ok(rankings)
    }

    async fn unlock_achievement(
        &self,
        user_id: &str,
        achievement: &Achievement,
    ) -> AppResult<bool> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let records = state.achievements.entry(user_id.to_owned()).or_default();
        if records.get(&achievement.id).is_some_and(|a| a.unlocked) {
            return Ok(false);
        }
        records.insert(achievement.id.clone(), achievement.clone());
        Ok(true)
    }

    async fn insert_missing_achievements(
        &self,
        user_id: &str,
        locked: &[Achievement],
    ) -> AppResult<usize> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let records = state.achievements.entry(user_id.to_owned()).or_default();
        let mut added = 0;
        for achievement in locked {
            if !records.contains_key(&achievement.id) {
                records.insert(achievement.id.clone(), achievement.clone());
                added += 1;
            }
        }
        Ok(added)
    }

    async fn list_achievements(&self, user_id: &str) -> AppResult<Vec<Achievement>> {
        let state = self.state.read().await;
        Ok(state
            .achievements
            .get(user_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_challenge(&self, user_id: &str, challenge: &DailyChallenge) -> AppResult<()> {
        self.check_writable()?;
        self.state
            .write()
            .await
            .challenges
            .entry(user_id.to_owned())
            .or_default()
            .push(challenge.clone());
        Ok(())
    }

    async fn list_challenges(&self, user_id: &str) -> AppResult<Vec<DailyChallenge>> {
        let state = self.state.read().await;
        Ok(state.challenges.get(user_id).cloned().unwrap_or_default())
    }

    async fn update_challenge_progress(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        progress: u8,
    ) -> AppResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.challenge_mut(user_id, challenge_id)?.progress = progress.min(100);
        Ok(())
    }

    async fn complete_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let challenge = state.challenge_mut(user_id, challenge_id)?;
        if challenge.completed {
            return Ok(false);
        }
        challenge.completed = true;
        challenge.progress = 100;
        challenge.completed_at = Some(completed_at);
        Ok(true)
    }
}
