// ABOUTME: Pose classification predicates built from joint angles and landmark offsets
// ABOUTME: Straight-arm and elbow plank detection plus push-up top/bottom readings with form checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::geometry::{calculate_angle, distance};
use posefit_core::constants::detection;
use posefit_core::models::{BodyLandmark, Point2, PoseFrame};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for every classification predicate
///
/// Angles are in degrees, offsets in normalized image units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    /// Push-up: both elbows above this angle is the top position
    pub push_up_top_angle: f32,
    /// Push-up: both elbows below this angle is the bottom position
    pub push_up_bottom_angle: f32,
    /// Push-up: maximum vertical offset between shoulders
    pub shoulder_level_tolerance: f32,
    /// Push-up: maximum vertical offset between shoulders and hips
    pub shoulder_hip_tolerance: f32,
    /// Push-up: maximum hip offset from the shoulder-ankle midpoint
    pub hip_sag_tolerance: f32,
    /// Push-up: smallest wrist-to-shoulder spacing ratio
    pub min_hand_ratio: f32,
    /// Push-up: largest wrist-to-shoulder spacing ratio
    pub max_hand_ratio: f32,
    /// Plank: both hip angles must exceed this
    pub plank_min_hip_angle: f32,
    /// Plank: both elbows above this angle is a straight-arm plank
    pub plank_straight_arm_angle: f32,
    /// Straight-arm plank: alignment tolerance for shoulders, hips, and ankles
    pub plank_straight_alignment_tolerance: f32,
    /// Elbow plank: smallest elbow angle
    pub plank_elbow_min_angle: f32,
    /// Elbow plank: largest elbow angle
    pub plank_elbow_max_angle: f32,
    /// Elbow plank: shoulder-hip alignment tolerance
    pub plank_elbow_shoulder_hip_tolerance: f32,
    /// Elbow plank: hip-ankle alignment tolerance
    pub plank_elbow_hip_ankle_tolerance: f32,
    /// Elbow plank: forearm flatness tolerance
    pub plank_forearm_level_tolerance: f32,
    /// Elbow plank: elbow-under-shoulder tolerance
    pub plank_elbow_under_shoulder_tolerance: f32,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            push_up_top_angle: detection::PUSHUP_TOP_ANGLE,
            push_up_bottom_angle: detection::PUSHUP_BOTTOM_ANGLE,
            shoulder_level_tolerance: detection::PUSHUP_SHOULDER_LEVEL_TOLERANCE,
            shoulder_hip_tolerance: detection::PUSHUP_SHOULDER_HIP_TOLERANCE,
            hip_sag_tolerance: detection::PUSHUP_HIP_SAG_TOLERANCE,
            min_hand_ratio: detection::PUSHUP_MIN_HAND_RATIO,
            max_hand_ratio: detection::PUSHUP_MAX_HAND_RATIO,
            plank_min_hip_angle: detection::PLANK_MIN_HIP_ANGLE,
            plank_straight_arm_angle: detection::PLANK_STRAIGHT_ARM_ANGLE,
            plank_straight_alignment_tolerance: detection::PLANK_STRAIGHT_ALIGNMENT_TOLERANCE,
            plank_elbow_min_angle: detection::PLANK_ELBOW_MIN_ANGLE,
            plank_elbow_max_angle: detection::PLANK_ELBOW_MAX_ANGLE,
            plank_elbow_shoulder_hip_tolerance: detection::PLANK_ELBOW_SHOULDER_HIP_TOLERANCE,
            plank_elbow_hip_ankle_tolerance: detection::PLANK_ELBOW_HIP_ANKLE_TOLERANCE,
            plank_forearm_level_tolerance: detection::PLANK_FOREARM_LEVEL_TOLERANCE,
            plank_elbow_under_shoulder_tolerance: detection::PLANK_ELBOW_UNDER_SHOULDER_TOLERANCE,
        }
    }
}

impl DetectionThresholds {
    /// Override the push-up top and bottom elbow angles
    #[must_use]
    pub const fn with_push_up_angles(mut self, top: f32, bottom: f32) -> Self {
        self.push_up_top_angle = top;
        self.push_up_bottom_angle = bottom;
        self
    }
}

/// The joints classification reads, extracted from a complete frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    /// Left shoulder
    pub left_shoulder: Point2,
    /// Right shoulder
    pub right_shoulder: Point2,
    /// Left elbow
    pub left_elbow: Point2,
    /// Right elbow
    pub right_elbow: Point2,
    /// Left wrist
    pub left_wrist: Point2,
    /// Right wrist
    pub right_wrist: Point2,
    /// Left hip
    pub left_hip: Point2,
    /// Right hip
    pub right_hip: Point2,
    /// Left ankle
    pub left_ankle: Point2,
    /// Right ankle
    pub right_ankle: Point2,
}

impl BodyPose {
    /// Extract the joints from a frame; `None` if the frame is incomplete
    #[must_use]
    pub fn from_frame(frame: &PoseFrame) -> Option<Self> {
        if !frame.is_complete() {
            return None;
        }
        Some(Self {
            left_shoulder: frame.point(BodyLandmark::LeftShoulder)?,
            right_shoulder: frame.point(BodyLandmark::RightShoulder)?,
            left_elbow: frame.point(BodyLandmark::LeftElbow)?,
            right_elbow: frame.point(BodyLandmark::RightElbow)?,
            left_wrist: frame.point(BodyLandmark::LeftWrist)?,
            right_wrist: frame.point(BodyLandmark::RightWrist)?,
            left_hip: frame.point(BodyLandmark::LeftHip)?,
            right_hip: frame.point(BodyLandmark::RightHip)?,
            left_ankle: frame.point(BodyLandmark::LeftAnkle)?,
            right_ankle: frame.point(BodyLandmark::RightAnkle)?,
        })
    }

    /// Shoulder-elbow-wrist angle on the left arm
    #[must_use]
    pub fn left_elbow_angle(&self) -> f32 {
        calculate_angle(self.left_shoulder, self.left_elbow, self.left_wrist)
    }

    /// Shoulder-elbow-wrist angle on the right arm
    #[must_use]
    pub fn right_elbow_angle(&self) -> f32 {
        calculate_angle(self.right_shoulder, self.right_elbow, self.right_wrist)
    }

    /// Shoulder-hip-ankle angle on the left side
    #[must_use]
    pub fn left_hip_angle(&self) -> f32 {
        calculate_angle(self.left_shoulder, self.left_hip, self.left_ankle)
    }

    /// Shoulder-hip-ankle angle on the right side
    #[must_use]
    pub fn right_hip_angle(&self) -> f32 {
        calculate_angle(self.right_shoulder, self.right_hip, self.right_ankle)
    }

    fn shoulder_y(&self) -> f32 {
        (self.left_shoulder.y + self.right_shoulder.y) / 2.0
    }

    fn hip_y(&self) -> f32 {
        (self.left_hip.y + self.right_hip.y) / 2.0
    }

    fn ankle_y(&self) -> f32 {
        (self.left_ankle.y + self.right_ankle.y) / 2.0
    }
}

/// Recognized plank variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlankForm {
    /// Arms extended, weight on the hands
    StraightArm,
    /// Forearms on the floor, elbows under the shoulders
    Elbow,
}

/// Which plank variant the pose holds, if any
#[must_use]
pub fn classify_plank(pose: &BodyPose, thresholds: &DetectionThresholds) -> Option<PlankForm> {
    if pose.left_hip_angle() <= thresholds.plank_min_hip_angle
        || pose.right_hip_angle() <= thresholds.plank_min_hip_angle
    {
        return None;
    }

    let left_elbow = pose.left_elbow_angle();
    let right_elbow = pose.right_elbow_angle();
    let shoulder_hip = pose.shoulder_y() - pose.hip_y();
    let hip_ankle = (pose.hip_y() - pose.ankle_y()).abs();

    if left_elbow > thresholds.plank_straight_arm_angle
        && right_elbow > thresholds.plank_straight_arm_angle
    {
        let tolerance = thresholds.plank_straight_alignment_tolerance;
        return (shoulder_hip.abs() <= tolerance && hip_ankle <= tolerance)
            .then_some(PlankForm::StraightArm);
    }

    let elbow_range = thresholds.plank_elbow_min_angle..=thresholds.plank_elbow_max_angle;
    if elbow_range.contains(&left_elbow) && elbow_range.contains(&right_elbow) {
        let aligned = shoulder_hip.abs() <= thresholds.plank_elbow_shoulder_hip_tolerance
            && hip_ankle <= thresholds.plank_elbow_hip_ankle_tolerance;
        let forearm_flat = (pose.left_elbow.y - pose.left_wrist.y).abs()
            <= thresholds.plank_forearm_level_tolerance
            || (pose.right_elbow.y - pose.right_wrist.y).abs()
                <= thresholds.plank_forearm_level_tolerance;
        let elbow_under_shoulder = (pose.left_shoulder.x - pose.left_elbow.x).abs()
            <= thresholds.plank_elbow_under_shoulder_tolerance
            || (pose.right_shoulder.x - pose.right_elbow.x).abs()
                <= thresholds.plank_elbow_under_shoulder_tolerance;
        return (aligned && forearm_flat && elbow_under_shoulder).then_some(PlankForm::Elbow);
    }

    None
}

/// Whether the pose is a straight-arm or elbow plank
#[must_use]
pub fn is_plank(pose: &BodyPose, thresholds: &DetectionThresholds) -> bool {
    classify_plank(pose, thresholds).is_some()
}

/// Push-up position and form readout for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushUpReading {
    /// Left elbow angle in degrees
    pub left_elbow_angle: f32,
    /// Right elbow angle in degrees
    pub right_elbow_angle: f32,
    /// Arms extended
    pub is_top: bool,
    /// Chest lowered
    pub is_bottom: bool,
    /// Shoulders level with each other
    pub shoulders_level: bool,
    /// Torso roughly horizontal
    pub torso_aligned: bool,
    /// Hips neither sagging nor piked
    pub hips_straight: bool,
    /// Hands about shoulder width apart
    pub hand_spacing_ok: bool,
}

impl PushUpReading {
    /// Whether every form check passed
    #[must_use]
    pub const fn form_ok(&self) -> bool {
        self.shoulders_level && self.torso_aligned && self.hips_straight && self.hand_spacing_ok
    }

    /// A recognized position held with good form
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        (self.is_top || self.is_bottom) && self.form_ok()
    }
}

/// Read the push-up position of a pose
#[must_use]
pub fn classify_push_up(pose: &BodyPose, thresholds: &DetectionThresholds) -> PushUpReading {
    let left_elbow_angle = pose.left_elbow_angle();
    let right_elbow_angle = pose.right_elbow_angle();

    let shoulder_y = pose.shoulder_y();
    let hip_y = pose.hip_y();
    let ankle_y = pose.ankle_y();

    let shoulder_width = distance(pose.left_shoulder, pose.right_shoulder);
    let hand_width = distance(pose.left_wrist, pose.right_wrist);
    let hand_spacing_ok = shoulder_width > 0.0 && {
        let ratio = hand_width / shoulder_width;
        (thresholds.min_hand_ratio..=thresholds.max_hand_ratio).contains(&ratio)
    };

    PushUpReading {
        left_elbow_angle,
        right_elbow_angle,
        is_top: left_elbow_angle > thresholds.push_up_top_angle
            && right_elbow_angle > thresholds.push_up_top_angle,
        is_bottom: left_elbow_angle < thresholds.push_up_bottom_angle
            && right_elbow_angle < thresholds.push_up_bottom_angle,
        shoulders_level: (pose.left_shoulder.y - pose.right_shoulder.y).abs()
            < thresholds.shoulder_level_tolerance,
        torso_aligned: (shoulder_y - hip_y).abs() < thresholds.shoulder_hip_tolerance,
        hips_straight: (hip_y - (shoulder_y + ankle_y) / 2.0).abs()
            < thresholds.hip_sag_tolerance,
        hand_spacing_ok,
    }
}
