// ABOUTME: Push-up repetition counter driven by top and bottom elbow positions
// ABOUTME: Counts reps, tracks consecutive runs, and throttles point awards by frame time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{elapsed_secs, ExerciseTracker, ScoringRules, SessionSummary, TrackerEvent};
use crate::classification::{classify_push_up, BodyPose, DetectionThresholds};
use posefit_core::models::{ExerciseType, PoseFrame};
use tracing::debug;

/// Counts push-ups from a stream of pose frames
///
/// A rep completes once a valid top position is followed by a valid bottom
/// position. Frames that fail the form checks leave the state untouched.
#[derive(Debug, Clone)]
pub struct PushUpTracker {
    thresholds: DetectionThresholds,
    rules: ScoringRules,
    is_at_top: bool,
    is_at_bottom: bool,
    ready_for_next_rep: bool,
    count: u32,
    consecutive_reps: u32,
    max_consecutive_reps: u32,
    points_earned: i64,
    reps_since_award: u32,
    last_award_ms: Option<i64>,
    started_at_ms: Option<i64>,
}

impl PushUpTracker {
    /// Create a tracker with the given thresholds and rules
    #[must_use]
    pub const fn new(thresholds: DetectionThresholds, rules: ScoringRules) -> Self {
        Self {
            thresholds,
            rules,
            is_at_top: false,
            is_at_bottom: false,
            ready_for_next_rep: false,
            count: 0,
            consecutive_reps: 0,
            max_consecutive_reps: 0,
            points_earned: 0,
            reps_since_award: 0,
            last_award_ms: None,
            started_at_ms: None,
        }
    }

    /// Repetitions counted this session
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Current run of consecutive repetitions
    #[must_use]
    pub const fn consecutive_reps(&self) -> u32 {
        self.consecutive_reps
    }

    /// Longest run of consecutive repetitions this session
    #[must_use]
    pub const fn max_consecutive_reps(&self) -> u32 {
        self.max_consecutive_reps
    }

    /// Points awarded this session
    #[must_use]
    pub const fn points_earned(&self) -> i64 {
        self.points_earned
    }

    fn calories(&self, reps: u32) -> f64 {
        f64::from(reps) * self.rules.calories_per_pushup
    }

    fn advance(&mut self, is_top: bool, is_bottom: bool, now_ms: i64) -> Vec<TrackerEvent> {
        let mut events = Vec::new();

        if is_top && !self.is_at_bottom && !self.ready_for_next_rep {
            self.ready_for_next_rep = true;
            debug!("Ready for next rep");
            events.push(TrackerEvent::ReadyForNextRep);
        }

        if is_top && !self.is_at_top && !self.is_at_bottom && self.ready_for_next_rep {
            self.is_at_top = true;
            debug!("Top position detected");
            events.push(TrackerEvent::TopReached);
        }

        if is_bottom && self.is_at_top && !self.is_at_bottom {
            self.is_at_bottom = true;
            debug!("Bottom position detected");
            events.push(TrackerEvent::BottomReached);
        }

        if self.is_at_top && self.is_at_bottom {
            self.complete_rep(now_ms, &mut events);
        }

        events
    }

    fn complete_rep(&mut self, now_ms: i64, events: &mut Vec<TrackerEvent>) {
        self.count += 1;
        self.consecutive_reps += 1;
        self.max_consecutive_reps = self.max_consecutive_reps.max(self.consecutive_reps);
        self.reps_since_award += 1;

        debug!(
            count = self.count,
            consecutive = self.consecutive_reps,
            "Push-up completed"
        );
        events.push(TrackerEvent::RepCompleted {
            count: self.count,
            consecutive: self.consecutive_reps,
        });

        let award_due = match self.last_award_ms {
            None => true,
            Some(last) => now_ms - last > self.rules.min_award_interval_ms,
        };
        if award_due {
            let points = self.rules.points_per_pushup * i64::from(self.consecutive_reps);
            self.points_earned += points;
            self.last_award_ms = Some(now_ms);
            events.push(TrackerEvent::PointsAwarded {
                points,
                reps: self.reps_since_award,
                max_consecutive: self.max_consecutive_reps,
            });
            self.reps_since_award = 0;
        }

        events.push(TrackerEvent::AchievementCheck {
            consecutive: self.consecutive_reps,
            unawarded_reps: self.reps_since_award,
        });

        self.is_at_top = false;
        self.is_at_bottom = false;
        self.ready_for_next_rep = false;
    }
}

impl Default for PushUpTracker {
    fn default() -> Self {
        Self::new(DetectionThresholds::default(), ScoringRules::default())
    }
}

impl ExerciseTracker for PushUpTracker {
    fn exercise(&self) -> ExerciseType {
        ExerciseType::PushUp
    }

    fn process_frame(&mut self, frame: &PoseFrame) -> Vec<TrackerEvent> {
        let Some(pose) = BodyPose::from_frame(frame) else {
            return Vec::new();
        };
        self.started_at_ms.get_or_insert(frame.timestamp_ms);

        let reading = classify_push_up(&pose, &self.thresholds);
        if !reading.is_valid() {
            return Vec::new();
        }
        self.advance(reading.is_top, reading.is_bottom, frame.timestamp_ms)
    }

    fn finish(&mut self, now_ms: i64) -> Option<SessionSummary> {
        let summary = (self.count > 0).then(|| {
            let started_at_ms = self.started_at_ms.unwrap_or(now_ms);
            SessionSummary {
                exercise: ExerciseType::PushUp,
                started_at_ms,
                ended_at_ms: now_ms,
                count: self.count,
                points_earned: self.points_earned,
                max_consecutive_reps: self.max_consecutive_reps,
                calories_burned: self.calories(self.count),
                duration_secs: elapsed_secs(started_at_ms, now_ms),
                unawarded_reps: self.reps_since_award,
            }
        });
        *self = Self::new(self.thresholds, self.rules);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn feed(tracker: &mut PushUpTracker, frames: &[PoseFrame]) -> Vec<TrackerEvent> {
        frames
            .iter()
            .flat_map(|frame| tracker.process_frame(frame))
            .collect()
    }

    fn awards(events: &[TrackerEvent]) -> Vec<(i64, u32)> {
        events
            .iter()
            .filter_map(|event| match event {
                TrackerEvent::PointsAwarded { points, reps, .. } => Some((*points, *reps)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_rep_sequence() {
        let mut tracker = PushUpTracker::default();
        let events = feed(
            &mut tracker,
            &[fixtures::push_up_top(0), fixtures::push_up_bottom(500)],
        );

        assert_eq!(
            events,
            vec![
                TrackerEvent::ReadyForNextRep,
                TrackerEvent::TopReached,
                TrackerEvent::BottomReached,
                TrackerEvent::RepCompleted {
                    count: 1,
                    consecutive: 1
                },
                TrackerEvent::PointsAwarded {
                    points: 1,
                    reps: 1,
                    max_consecutive: 1
                },
                TrackerEvent::AchievementCheck {
                    consecutive: 1,
                    unawarded_reps: 0
                },
            ]
        );
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_bottom_without_top_does_not_count() {
        let mut tracker = PushUpTracker::default();
        let events = feed(
            &mut tracker,
            &[fixtures::push_up_bottom(0), fixtures::push_up_bottom(100)],
        );
        assert!(events.is_empty());
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_repeated_top_frames_are_idempotent() {
        let mut tracker = PushUpTracker::default();
        feed(&mut tracker, &fixtures::push_up_reps(3, 0, 100));
        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.consecutive_reps(), 3);
        assert_eq!(tracker.max_consecutive_reps(), 3);
    }

    #[test]
    fn test_invalid_and_incomplete_frames_are_ignored() {
        let mut tracker = PushUpTracker::default();
        let events = feed(
            &mut tracker,
            &[
                fixtures::push_up_top(0),
                fixtures::standing(100),
                PoseFrame::new(200, Vec::new()),
                fixtures::push_up_bottom(300),
            ],
        );
        assert_eq!(tracker.count(), 1);
        assert!(events.contains(&TrackerEvent::RepCompleted {
            count: 1,
            consecutive: 1
        }));
    }

    #[test]
    fn test_awards_are_throttled_and_scale_with_streak() {
        let mut tracker = PushUpTracker::default();
        // Reps complete at 200, 500, 800, ... (every 300 ms)
        let events = feed(&mut tracker, &fixtures::push_up_reps(3, 0, 100));
        assert_eq!(awards(&events), vec![(1, 1)]);

        // Well past the throttle window: the award covers the two skipped reps
        let later = feed(
            &mut tracker,
            &[fixtures::push_up_top(10_000), fixtures::push_up_bottom(10_100)],
        );
        assert_eq!(awards(&later), vec![(4, 3)]);
        assert_eq!(tracker.points_earned(), 5);
    }

    #[test]
    fn test_award_exactly_at_interval_is_throttled() {
        let mut tracker = PushUpTracker::default();
        feed(
            &mut tracker,
            &[fixtures::push_up_top(0), fixtures::push_up_bottom(1_000)],
        );
        let events = feed(
            &mut tracker,
            &[fixtures::push_up_top(5_500), fixtures::push_up_bottom(6_000)],
        );
        assert!(awards(&events).is_empty());
    }

    #[test]
    fn test_achievement_checks_carry_unawarded_reps() {
        let mut tracker = PushUpTracker::default();
        let events = feed(&mut tracker, &fixtures::push_up_reps(3, 0, 100));
        let pending: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                TrackerEvent::AchievementCheck { unawarded_reps, .. } => Some(*unawarded_reps),
                _ => None,
            })
            .collect();
        assert_eq!(pending, vec![0, 1, 2]);
    }

    #[test]
    fn test_finish_summarizes_and_resets() {
        let mut tracker = PushUpTracker::default();
        feed(&mut tracker, &fixtures::push_up_reps(4, 1_000, 100));

        let summary = tracker.finish(31_000).unwrap();
        assert_eq!(summary.exercise, ExerciseType::PushUp);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.max_consecutive_reps, 4);
        assert_eq!(summary.duration_secs, 30);
        assert_eq!(summary.points_earned, 1);
        assert_eq!(summary.unawarded_reps, 3);
        assert!((summary.calories_burned - 1.6).abs() < 1e-9);

        assert_eq!(tracker.count(), 0);
        assert!(tracker.finish(32_000).is_none());
    }
}
