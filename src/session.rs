// ABOUTME: Live workout session routing tracker events to scoring, achievements, and challenges
// ABOUTME: Drops frames that arrive while a previous frame is still being persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Session
//!
//! One [`WorkoutSession`] per user and exercise. Frames are fed in capture
//! order; each frame's events are persisted before the next frame is
//! accepted.

use crate::services::Services;
use chrono::Utc;
use posefit_core::errors::{AppError, AppResult};
use posefit_core::models::{ExerciseType, PoseFrame, SessionRecord, UserIdentity};
use posefit_detection::{
    ExerciseTracker, PlankTracker, PushUpTracker, SessionSummary, TrackerEvent,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Result of feeding one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame was tracked and its events persisted
    Processed(Vec<TrackerEvent>),
    /// Another frame was still being processed; this one was dropped
    Skipped,
}

struct SessionState {
    tracker: Box<dyn ExerciseTracker>,
    plank_seconds: u32,
}

/// A user's live workout
pub struct WorkoutSession {
    user: UserIdentity,
    exercise: ExerciseType,
    services: Services,
    state: Mutex<SessionState>,
}

impl WorkoutSession {
    /// Create a session without touching the store
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise has no tracker
    pub fn new(user: UserIdentity, exercise: ExerciseType, services: Services) -> AppResult<Self> {
        let tracker: Box<dyn ExerciseTracker> = match exercise {
            ExerciseType::PushUp => {
                Box::new(PushUpTracker::new(services.detection, services.rules))
            }
            ExerciseType::Plank => Box::new(PlankTracker::new(services.detection, services.rules)),
            ExerciseType::Crunch => {
                return Err(AppError::invalid_input(format!(
                    "No tracker available for {exercise}"
                )))
            }
        };

        Ok(Self {
            user,
            exercise,
            services,
            state: Mutex::new(SessionState {
                tracker,
                plank_seconds: 0,
            }),
        })
    }

    /// Create a session and prepare the user's progress
    ///
    /// Creates the profile if needed, replays queued offline updates, stores
    /// locked achievement records, and issues a daily challenge if none is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise has no tracker or the profile cannot be created
    pub async fn start(
        user: UserIdentity,
        exercise: ExerciseType,
        services: Services,
    ) -> AppResult<Self> {
        let session = Self::new(user, exercise, services)?;
        let user_id = session.user.user_id.as_str();

        session.services.scoring.ensure_profile(&session.user).await?;
        if let Err(e) = session.services.scoring.sync_pending(user_id).await {
            warn!(user.id = %user_id, error = %e, "Failed to sync pending operations");
        }
        if let Err(e) = session.services.achievements.initialize(user_id).await {
            warn!(user.id = %user_id, error = %e, "Failed to initialize achievements");
        }
        if let Err(e) = session.services.challenges.check_and_generate(user_id).await {
            warn!(user.id = %user_id, error = %e, "Failed to check daily challenge");
        }

        info!(user.id = %user_id, exercise = %exercise, "Workout session started");
        Ok(session)
    }

    /// User the session credits
    #[must_use]
    pub const fn user(&self) -> &UserIdentity {
        &self.user
    }

    /// Exercise being tracked
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Track one frame and persist its events
    ///
    /// # Errors
    ///
    /// Returns an error if an offline update could not be queued
    pub async fn process_frame(&self, frame: &PoseFrame) -> AppResult<FrameOutcome> {
        let Ok(mut state) = self.state.try_lock() else {
            debug!(user.id = %self.user.user_id, timestamp_ms = frame.timestamp_ms, "Frame dropped, previous frame still processing");
            return Ok(FrameOutcome::Skipped);
        };

        let events = state.tracker.process_frame(frame);
        for event in &events {
            self.route(&mut state, event).await?;
        }
        Ok(FrameOutcome::Processed(events))
    }

    async fn route(&self, state: &mut SessionState, event: &TrackerEvent) -> AppResult<()> {
        let services = &self.services;
        let user = &self.user;
        match event {
            TrackerEvent::PointsAwarded {
                points,
                reps,
                max_consecutive,
            } => {
                let calories = f64::from(*reps) * services.rules.calories_per_pushup;
                services
                    .scoring
                    .award_push_ups(user, *points, *reps, *max_consecutive, calories)
                    .await?;
            }
            TrackerEvent::AchievementCheck {
                consecutive,
                unawarded_reps,
            } => {
                self.check_push_up_achievements(*consecutive, *unawarded_reps)
                    .await;
            }
            TrackerEvent::RepCompleted { count, .. } => {
                self.update_challenge(ExerciseType::PushUp, *count).await;
            }
            TrackerEvent::IntervalAwarded {
                intervals,
                points,
                seconds,
            } => {
                services
                    .scoring
                    .award_plank_intervals(user, *intervals, *points, *seconds)
                    .await?;
                state.plank_seconds += seconds;
                self.update_challenge(ExerciseType::Plank, state.plank_seconds)
                    .await;
            }
            TrackerEvent::MilestoneReached { seconds } => {
                info!(user.id = %user.user_id, seconds, "Plank milestone reached");
            }
            TrackerEvent::PlankEnded {
                duration_secs,
                tier,
            } => {
                info!(
                    user.id = %user.user_id,
                    duration_secs,
                    tier = tier.map_or("none", |t| t.label()),
                    "Plank ended"
                );
            }
            TrackerEvent::SessionCompleted(summary) => {
                self.save(summary).await?;
            }
            TrackerEvent::ReadyForNextRep
            | TrackerEvent::TopReached
            | TrackerEvent::BottomReached
            | TrackerEvent::PlankStarted => {}
        }
        Ok(())
    }

    /// Stored reps lag the live count by whatever the award throttle still holds back
    async fn check_push_up_achievements(&self, consecutive: u32, unawarded_reps: u32) {
        let store = self.services.scoring.store();
        let total_reps = match store.get_profile(&self.user.user_id).await {
            Ok(profile) => profile.map_or(0, |p| p.push_ups.count) + unawarded_reps,
            Err(e) => {
                warn!(user.id = %self.user.user_id, error = %e, "Failed to load profile for achievements");
                return;
            }
        };
        if let Err(e) = self
            .services
            .achievements
            .check_push_ups(&self.user, total_reps, consecutive)
            .await
        {
            warn!(user.id = %self.user.user_id, error = %e, "Push-up achievement check failed");
        }
    }

    async fn update_challenge(&self, exercise: ExerciseType, count: u32) {
        if let Err(e) = self
            .services
            .challenges
            .update_progress(&self.user, exercise, count)
            .await
        {
            warn!(user.id = %self.user.user_id, error = %e, "Challenge progress update failed");
        }
    }

    async fn save(&self, summary: &SessionSummary) -> AppResult<SessionRecord> {
        let record = self
            .services
            .scoring
            .save_session(&self.user, summary, Utc::now())
            .await?;

        if summary.exercise == ExerciseType::PushUp {
            // Unawarded reps were just credited, so re-check against the stored total
            self.check_push_up_achievements(summary.max_consecutive_reps, 0)
                .await;
        }
        if summary.exercise == ExerciseType::Plank {
            self.services
                .scoring
                .record_plank_duration(&self.user.user_id, summary.duration_secs)
                .await;
            if let Err(e) = self
                .services
                .achievements
                .check_plank(&self.user, summary.duration_secs)
                .await
            {
                warn!(user.id = %self.user.user_id, error = %e, "Plank achievement check failed");
            }
        }
        Ok(record)
    }

    /// Save the open session, if any, and clear the tracker
    ///
    /// Push-up sessions are saved when at least one repetition was counted;
    /// an open plank is ended and saved if it was held long enough.
    ///
    /// # Errors
    ///
    /// Returns an error if an offline update could not be queued
    pub async fn reset(&self, now_ms: i64) -> AppResult<Option<SessionRecord>> {
        let mut state = self.state.lock().await;
        state.plank_seconds = 0;
        match state.tracker.finish(now_ms) {
            Some(summary) => self.save(&summary).await.map(Some),
            None => Ok(None),
        }
    }

    /// End the workout: save any open session and sync queued offline updates
    ///
    /// # Errors
    ///
    /// Returns an error if an offline update could not be queued or the local queue is unreadable
    pub async fn finish(self, now_ms: i64) -> AppResult<Option<SessionRecord>> {
        let record = self.reset(now_ms).await?;
        self.services.scoring.sync_pending(&self.user.user_id).await?;
        info!(user.id = %self.user.user_id, exercise = %self.exercise, "Workout session finished");
        Ok(record)
    }
}
