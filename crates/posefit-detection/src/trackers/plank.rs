// ABOUTME: Plank hold timer awarding points per elapsed interval
// ABOUTME: Announces duration milestones and grades the hold when the plank ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{elapsed_secs, ExerciseTracker, PlankTier, ScoringRules, SessionSummary, TrackerEvent};
use crate::classification::{is_plank, BodyPose, DetectionThresholds};
use posefit_core::constants::scoring::PLANK_MILESTONES_SECS;
use posefit_core::models::{ExerciseType, PoseFrame};
use tracing::{debug, info};

/// Times plank holds from a stream of pose frames
#[derive(Debug, Clone)]
pub struct PlankTracker {
    thresholds: DetectionThresholds,
    rules: ScoringRules,
    in_plank: bool,
    started_at_ms: i64,
    last_award_ms: i64,
    session_points: i64,
    session_seconds: u32,
    duration_ms: i64,
}

impl PlankTracker {
    /// Create a tracker with the given thresholds and rules
    #[must_use]
    pub const fn new(thresholds: DetectionThresholds, rules: ScoringRules) -> Self {
        Self {
            thresholds,
            rules,
            in_plank: false,
            started_at_ms: 0,
            last_award_ms: 0,
            session_points: 0,
            session_seconds: 0,
            duration_ms: 0,
        }
    }

    /// Whether a hold is in progress
    #[must_use]
    pub const fn in_plank(&self) -> bool {
        self.in_plank
    }

    /// Length of the current or last hold in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Points awarded during the current or last hold
    #[must_use]
    pub const fn session_points(&self) -> i64 {
        self.session_points
    }

    /// Seconds credited during the current or last hold
    #[must_use]
    pub const fn session_seconds(&self) -> u32 {
        self.session_seconds
    }

    fn start(&mut self, now_ms: i64) -> Vec<TrackerEvent> {
        self.in_plank = true;
        self.started_at_ms = now_ms;
        self.last_award_ms = now_ms;
        self.session_points = 0;
        self.session_seconds = 0;
        self.duration_ms = 0;
        debug!("Plank started");
        vec![TrackerEvent::PlankStarted]
    }

    fn hold(&mut self, now_ms: i64) -> Vec<TrackerEvent> {
        self.duration_ms = now_ms - self.started_at_ms;

        let interval_ms = self.rules.plank_interval_ms;
        if interval_ms <= 0 || now_ms - self.last_award_ms < interval_ms {
            return Vec::new();
        }

        let intervals = ((now_ms - self.last_award_ms) / interval_ms) as u32;
        let previous_seconds = self.session_seconds;
        let points = self.rules.points_per_plank_interval * i64::from(intervals);
        let seconds = self.rules.plank_interval_secs() * intervals;

        self.session_points += points;
        self.session_seconds += seconds;
        self.last_award_ms += i64::from(intervals) * interval_ms;

        let mut events = vec![TrackerEvent::IntervalAwarded {
            intervals,
            points,
            seconds,
        }];
        for milestone in PLANK_MILESTONES_SECS {
            if previous_seconds < milestone && self.session_seconds >= milestone {
                info!(seconds = milestone, "Plank milestone reached");
                events.push(TrackerEvent::MilestoneReached { seconds: milestone });
            }
        }
        events
    }

    fn end(&mut self, now_ms: i64) -> (TrackerEvent, Option<SessionSummary>) {
        self.in_plank = false;
        self.duration_ms = now_ms - self.started_at_ms;
        let duration_secs = elapsed_secs(self.started_at_ms, now_ms);
        debug!(duration_secs, "Plank ended");

        let summary = (duration_secs >= self.rules.min_saved_plank_secs).then(|| SessionSummary {
            exercise: ExerciseType::Plank,
            started_at_ms: self.started_at_ms,
            ended_at_ms: now_ms,
            count: 0,
            points_earned: self.session_points,
            max_consecutive_reps: 0,
            calories_burned: 0.0,
            duration_secs,
            unawarded_reps: 0,
        });
        let ended = TrackerEvent::PlankEnded {
            duration_secs,
            tier: PlankTier::for_duration(duration_secs),
        };
        (ended, summary)
    }
}

impl Default for PlankTracker {
    fn default() -> Self {
        Self::new(DetectionThresholds::default(), ScoringRules::default())
    }
}

impl ExerciseTracker for PlankTracker {
    fn exercise(&self) -> ExerciseType {
        ExerciseType::Plank
    }

    fn process_frame(&mut self, frame: &PoseFrame) -> Vec<TrackerEvent> {
        let Some(pose) = BodyPose::from_frame(frame) else {
            return Vec::new();
        };
        let now_ms = frame.timestamp_ms;

        match (is_plank(&pose, &self.thresholds), self.in_plank) {
            (true, false) => self.start(now_ms),
            (true, true) => self.hold(now_ms),
            (false, true) => {
                let (ended, summary) = self.end(now_ms);
                let mut events = vec![ended];
                events.extend(summary.map(TrackerEvent::SessionCompleted));
                events
            }
            (false, false) => Vec::new(),
        }
    }

    fn finish(&mut self, now_ms: i64) -> Option<SessionSummary> {
        if !self.in_plank {
            return None;
        }
        let (_, summary) = self.end(now_ms);
        summary
    }
}
