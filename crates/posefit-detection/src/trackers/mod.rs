// ABOUTME: Exercise tracker abstraction, tracker events, and session summaries
// ABOUTME: Trackers are synchronous state machines; persistence happens in the scoring layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Trackers
//!
//! A tracker consumes frames in capture order and emits [`TrackerEvent`]s.
//! Time is taken from frame timestamps, never from the wall clock, so a
//! recorded session replays identically.

mod plank;
mod push_up;

pub use plank::PlankTracker;
pub use push_up::PushUpTracker;

use posefit_core::constants::scoring;
use posefit_core::models::{ExerciseType, PoseFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point and timing rules applied by the trackers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points per push-up, multiplied by the consecutive rep count
    pub points_per_pushup: i64,
    /// Minimum time between two push-up awards
    pub min_award_interval_ms: i64,
    /// Calories burned per push-up
    pub calories_per_pushup: f64,
    /// Length of one scored plank interval
    pub plank_interval_ms: i64,
    /// Points per plank interval
    pub points_per_plank_interval: i64,
    /// Planks shorter than this produce no session summary
    pub min_saved_plank_secs: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            points_per_pushup: scoring::POINTS_PER_PUSHUP,
            min_award_interval_ms: scoring::MIN_AWARD_INTERVAL_MS,
            calories_per_pushup: scoring::CALORIES_PER_PUSHUP,
            plank_interval_ms: scoring::PLANK_INTERVAL_MS,
            points_per_plank_interval: scoring::POINTS_PER_PLANK_INTERVAL,
            min_saved_plank_secs: scoring::MIN_SAVED_PLANK_SECS,
        }
    }
}

impl ScoringRules {
    /// Whole seconds covered by one plank interval
    #[must_use]
    pub const fn plank_interval_secs(&self) -> u32 {
        (self.plank_interval_ms / 1000) as u32
    }
}

/// Plank hold grade announced when a plank ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlankTier {
    /// Under 30 seconds
    Beginner,
    /// 30 seconds or more
    Intermediate,
    /// 60 seconds or more
    Expert,
    /// 120 seconds or more
    Master,
    /// 180 seconds or more
    Legendary,
}

impl PlankTier {
    /// Grade a hold; holds under 15 seconds are not announced
    #[must_use]
    pub const fn for_duration(duration_secs: u32) -> Option<Self> {
        match duration_secs {
            180.. => Some(Self::Legendary),
            120.. => Some(Self::Master),
            60.. => Some(Self::Expert),
            30.. => Some(Self::Intermediate),
            d if d >= scoring::PLANK_TIER_ANNOUNCE_SECS => Some(Self::Beginner),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Expert => "EXPERT",
            Self::Master => "MASTER",
            Self::Legendary => "LEGENDARY",
        }
    }
}

impl fmt::Display for PlankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What happened while processing a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// Arms extended after a completed rep; the next rep may start
    ReadyForNextRep,
    /// Top position recorded
    TopReached,
    /// Bottom position recorded
    BottomReached,
    /// A push-up was counted
    RepCompleted {
        /// Repetitions in this session
        count: u32,
        /// Current run of consecutive repetitions
        consecutive: u32,
    },
    /// Push-up points are due
    PointsAwarded {
        /// Points earned
        points: i64,
        /// Repetitions covered since the previous award
        reps: u32,
        /// Longest consecutive run so far this session
        max_consecutive: u32,
    },
    /// Push-up achievements should be re-evaluated
    AchievementCheck {
        /// Current run of consecutive repetitions
        consecutive: u32,
        /// Completed repetitions not yet covered by an award
        unawarded_reps: u32,
    },
    /// A plank hold began
    PlankStarted,
    /// Whole plank intervals elapsed since the previous award
    IntervalAwarded {
        /// Intervals covered
        intervals: u32,
        /// Points earned
        points: i64,
        /// Seconds credited
        seconds: u32,
    },
    /// The hold crossed a milestone
    MilestoneReached {
        /// Milestone in seconds
        seconds: u32,
    },
    /// A plank hold ended
    PlankEnded {
        /// Hold length in whole seconds
        duration_secs: u32,
        /// Grade of the hold, if long enough to announce
        tier: Option<PlankTier>,
    },
    /// A session finished and should be saved to history
    SessionCompleted(SessionSummary),
}

/// Totals of one finished exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Exercise performed
    pub exercise: ExerciseType,
    /// First frame timestamp of the session
    pub started_at_ms: i64,
    /// Timestamp the session ended
    pub ended_at_ms: i64,
    /// Repetitions counted
    pub count: u32,
    /// Points awarded during the session
    pub points_earned: i64,
    /// Longest run of consecutive repetitions
    pub max_consecutive_reps: u32,
    /// Calories burned
    pub calories_burned: f64,
    /// Session length in whole seconds
    pub duration_secs: u32,
    /// Repetitions completed after the last award, not yet persisted
    pub unawarded_reps: u32,
}

/// A per-exercise state machine fed with pose frames
pub trait ExerciseTracker: Send {
    /// Exercise this tracker counts
    fn exercise(&self) -> ExerciseType;

    /// Advance the state machine with one frame
    fn process_frame(&mut self, frame: &PoseFrame) -> Vec<TrackerEvent>;

    /// End the current session at `now_ms`, returning its summary when it is
    /// worth saving, and clear all counters
    fn finish(&mut self, now_ms: i64) -> Option<SessionSummary>;
}

pub(crate) fn elapsed_secs(start_ms: i64, end_ms: i64) -> u32 {
    ((end_ms - start_ms).max(0) / 1000) as u32
}
