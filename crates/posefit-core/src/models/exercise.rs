// ABOUTME: Exercise type enumeration shared by trackers, challenges, and the leaderboard
// ABOUTME: Carries the stable wire names used in storage and on the command line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise kinds known to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseType {
    /// Push-ups, counted by the push-up tracker
    #[serde(rename = "pushup")]
    PushUp,
    /// Planks, timed by the plank tracker
    #[serde(rename = "plank")]
    Plank,
    /// Crunches; appear in challenges and rankings but have no tracker
    #[serde(rename = "crunches")]
    Crunch,
}

impl ExerciseType {
    /// Every exercise kind, in display order
    pub const ALL: [Self; 3] = [Self::PushUp, Self::Plank, Self::Crunch];

    /// Stable wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PushUp => "pushup",
            Self::Plank => "plank",
            Self::Crunch => "crunches",
        }
    }

    /// Whether progress is counted in seconds rather than repetitions
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::Plank)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pushup" | "pushups" | "push-up" | "push-ups" => Ok(Self::PushUp),
            "plank" | "planks" => Ok(Self::Plank),
            "crunch" | "crunches" => Ok(Self::Crunch),
            other => Err(AppError::invalid_input(format!(
                "Unknown exercise type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!("Push-Ups".parse::<ExerciseType>().ok(), Some(ExerciseType::PushUp));
        assert_eq!("plank".parse::<ExerciseType>().ok(), Some(ExerciseType::Plank));
        assert_eq!("crunch".parse::<ExerciseType>().ok(), Some(ExerciseType::Crunch));
        assert!("burpee".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn test_wire_name_matches_serde() {
        for exercise in ExerciseType::ALL {
            let json = serde_json::to_string(&exercise).unwrap();
            assert_eq!(json, format!("\"{}\"", exercise.as_str()));
        }
    }
}
