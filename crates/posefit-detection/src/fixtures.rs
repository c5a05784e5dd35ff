// ABOUTME: Synthetic landmark frames for canonical poses
// ABOUTME: Used by unit tests, integration tests, benchmarks, and the CLI demo replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Hand-placed poses in normalized image coordinates. Joints the detectors
//! do not read sit at the image centre.

use posefit_core::models::{BodyLandmark, Landmark, PoseFrame};

/// Landmarks emitted by the BlazePose model
pub const LANDMARK_COUNT: usize = 33;

/// Frame with every joint at the image centre except the ones given
#[must_use]
pub fn frame(timestamp_ms: i64, joints: &[(BodyLandmark, f32, f32)]) -> PoseFrame {
    with_joints(
        PoseFrame::new(timestamp_ms, vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT]),
        joints,
    )
}

/// Move joints of an existing frame
#[must_use]
pub fn with_joints(mut frame: PoseFrame, joints: &[(BodyLandmark, f32, f32)]) -> PoseFrame {
    for &(joint, x, y) in joints {
        if let Some(landmark) = frame.landmarks.get_mut(joint.index()) {
            *landmark = Landmark::new(x, y);
        }
    }
    frame
}

/// Front view, arms locked out
#[must_use]
pub fn push_up_top(timestamp_ms: i64) -> PoseFrame {
    frame(
        timestamp_ms,
        &[
            (BodyLandmark::LeftShoulder, 0.4, 0.4),
            (BodyLandmark::RightShoulder, 0.6, 0.4),
            (BodyLandmark::LeftElbow, 0.4, 0.5),
            (BodyLandmark::RightElbow, 0.6, 0.5),
            (BodyLandmark::LeftWrist, 0.4, 0.6),
            (BodyLandmark::RightWrist, 0.6, 0.6),
            (BodyLandmark::LeftHip, 0.4, 0.45),
            (BodyLandmark::RightHip, 0.6, 0.45),
            (BodyLandmark::LeftAnkle, 0.4, 0.5),
            (BodyLandmark::RightAnkle, 0.6, 0.5),
        ],
    )
}

/// Front view, chest lowered with elbows flared
#[must_use]
pub fn push_up_bottom(timestamp_ms: i64) -> PoseFrame {
    frame(
        timestamp_ms,
        &[
            (BodyLandmark::LeftShoulder, 0.4, 0.55),
            (BodyLandmark::RightShoulder, 0.6, 0.55),
            (BodyLandmark::LeftElbow, 0.3, 0.6),
            (BodyLandmark::RightElbow, 0.7, 0.6),
            (BodyLandmark::LeftWrist, 0.4, 0.65),
            (BodyLandmark::RightWrist, 0.6, 0.65),
            (BodyLandmark::LeftHip, 0.4, 0.57),
            (BodyLandmark::RightHip, 0.6, 0.57),
            (BodyLandmark::LeftAnkle, 0.4, 0.6),
            (BodyLandmark::RightAnkle, 0.6, 0.6),
        ],
    )
}

/// Side view, body straight on extended arms
#[must_use]
pub fn straight_arm_plank(timestamp_ms: i64) -> PoseFrame {
    frame(
        timestamp_ms,
        &[
            (BodyLandmark::LeftShoulder, 0.3, 0.5),
            (BodyLandmark::RightShoulder, 0.3, 0.51),
            (BodyLandmark::LeftElbow, 0.3, 0.6),
            (BodyLandmark::RightElbow, 0.3, 0.61),
            (BodyLandmark::LeftWrist, 0.3, 0.7),
            (BodyLandmark::RightWrist, 0.3, 0.71),
            (BodyLandmark::LeftHip, 0.5, 0.5),
            (BodyLandmark::RightHip, 0.5, 0.51),
            (BodyLandmark::LeftAnkle, 0.8, 0.5),
            (BodyLandmark::RightAnkle, 0.8, 0.51),
        ],
    )
}

/// Side view, weight on flat forearms
#[must_use]
pub fn elbow_plank(timestamp_ms: i64) -> PoseFrame {
    frame(
        timestamp_ms,
        &[
            (BodyLandmark::LeftShoulder, 0.3, 0.5),
            (BodyLandmark::RightShoulder, 0.3, 0.51),
            (BodyLandmark::LeftElbow, 0.3, 0.65),
            (BodyLandmark::RightElbow, 0.3, 0.66),
            (BodyLandmark::LeftWrist, 0.15, 0.65),
            (BodyLandmark::RightWrist, 0.15, 0.66),
            (BodyLandmark::LeftHip, 0.5, 0.5),
            (BodyLandmark::RightHip, 0.5, 0.51),
            (BodyLandmark::LeftAnkle, 0.8, 0.52),
            (BodyLandmark::RightAnkle, 0.8, 0.53),
        ],
    )
}

/// Upright with arms hanging
#[must_use]
pub fn standing(timestamp_ms: i64) -> PoseFrame {
    frame(
        timestamp_ms,
        &[
            (BodyLandmark::LeftShoulder, 0.4, 0.3),
            (BodyLandmark::RightShoulder, 0.6, 0.3),
            (BodyLandmark::LeftElbow, 0.4, 0.45),
            (BodyLandmark::RightElbow, 0.6, 0.45),
            (BodyLandmark::LeftWrist, 0.4, 0.6),
            (BodyLandmark::RightWrist, 0.6, 0.6),
            (BodyLandmark::LeftHip, 0.42, 0.55),
            (BodyLandmark::RightHip, 0.58, 0.55),
            (BodyLandmark::LeftAnkle, 0.42, 0.9),
            (BodyLandmark::RightAnkle, 0.58, 0.9),
        ],
    )
}

/// Frames for `reps` push-ups starting at `start_ms`, `step_ms` apart
///
/// Each repetition is top, top, bottom; the repeated top frame stands in for
/// detector jitter and must not change the count.
#[must_use]
pub fn push_up_reps(reps: u32, start_ms: i64, step_ms: i64) -> Vec<PoseFrame> {
    let mut frames = Vec::with_capacity(reps as usize * 3);
    let mut timestamp = start_ms;
    for _ in 0..reps {
        frames.push(push_up_top(timestamp));
        timestamp += step_ms;
        frames.push(push_up_top(timestamp));
        timestamp += step_ms;
        frames.push(push_up_bottom(timestamp));
        timestamp += step_ms;
    }
    frames
}

/// Straight-arm plank frames from `start_ms` for `hold_secs`, `step_ms` apart,
/// followed by a standing frame 1 ms after the last plank frame
#[must_use]
pub fn plank_hold(start_ms: i64, hold_secs: u32, step_ms: i64) -> Vec<PoseFrame> {
    let end_ms = start_ms + i64::from(hold_secs) * 1000;
    let step_ms = step_ms.max(1);
    let mut frames: Vec<PoseFrame> = (start_ms..=end_ms)
        .step_by(step_ms as usize)
        .map(straight_arm_plank)
        .collect();
    if frames.last().map(|f| f.timestamp_ms) != Some(end_ms) {
        frames.push(straight_arm_plank(end_ms));
    }
    frames.push(standing(end_ms + 1));
    frames
}
