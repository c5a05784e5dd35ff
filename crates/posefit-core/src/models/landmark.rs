// ABOUTME: Pose landmark types produced by the external pose-estimation model
// ABOUTME: Defines Landmark, PoseFrame, Point2, and the BlazePose joint index layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Joints of the 33-point BlazePose layout that exercise detection reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyLandmark {
    /// Left shoulder
    LeftShoulder = 11,
    /// Right shoulder
    RightShoulder = 12,
    /// Left elbow
    LeftElbow = 13,
    /// Right elbow
    RightElbow = 14,
    /// Left wrist
    LeftWrist = 15,
    /// Right wrist
    RightWrist = 16,
    /// Left hip
    LeftHip = 23,
    /// Right hip
    RightHip = 24,
    /// Left ankle
    LeftAnkle = 27,
    /// Right ankle
    RightAnkle = 28,
}

impl BodyLandmark {
    /// Minimum landmark count a frame needs so every joint above is present
    pub const REQUIRED_COUNT: usize = 29;

    /// Position of this joint in a frame's landmark list
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single estimated body-joint position in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate (0.0 to 1.0, left to right)
    pub x: f32,
    /// Normalized Y coordinate (0.0 to 1.0, top to bottom)
    pub y: f32,
    /// Relative depth, unused by 2D detection
    #[serde(default)]
    pub z: f32,
    /// Detector confidence that the joint is visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Create a landmark from a 2D position
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    /// Project onto the image plane
    #[must_use]
    pub const fn point(&self) -> Point2 {
        Point2 {
            x: self.x,
            y: self.y,
        }
    }
}

/// A point in the image plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate (grows downward)
    pub y: f32,
}

impl Point2 {
    /// Create a point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One output of the pose detector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Landmarks in BlazePose order
    pub landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Create a frame
    #[must_use]
    pub const fn new(timestamp_ms: i64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// Whether the frame carries every joint the trackers read
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= BodyLandmark::REQUIRED_COUNT
    }

    /// Position of a joint, if the frame contains it
    #[must_use]
    pub fn point(&self, joint: BodyLandmark) -> Option<Point2> {
        self.landmarks.get(joint.index()).map(Landmark::point)
    }
}
