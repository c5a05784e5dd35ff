// ABOUTME: Environment-based configuration for storage, detection thresholds, scoring, and retries
// ABOUTME: Invalid values fall back to defaults with a warning; validate() rejects inconsistent settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resilience::RetryPolicy;
use posefit_core::constants::{defaults, env_config, scoring};
use posefit_core::errors::{AppError, AppResult};
use posefit_detection::{DetectionThresholds, ScoringRules};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Type-safe storage location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite`, discarded on exit
    SQLiteMemory,
    /// Process-local store without `SQLite`
    InMemory,
}

impl DatabaseUrl {
    /// Parse from string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        if s == defaults::MEMORY_DATABASE {
            return Self::InMemory;
        }
        match s.strip_prefix("sqlite:") {
            Some(":memory:") => Self::SQLiteMemory,
            Some(path) => Self::SQLite {
                path: PathBuf::from(path.trim_start_matches("//")),
            },
            // Fallback: treat as SQLite file path
            None => Self::SQLite {
                path: PathBuf::from(s),
            },
        }
    }

    /// Convert to an sqlx connection string; `None` for the in-memory store
    #[must_use]
    pub fn to_connection_string(&self) -> Option<String> {
        match self {
            Self::SQLite { path } => Some(format!("sqlite:{}", path.display())),
            Self::SQLiteMemory => Some("sqlite::memory:".to_owned()),
            Self::InMemory => None,
        }
    }

    /// Whether progress is lost when the process exits
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, Self::SQLiteMemory | Self::InMemory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_connection_string() {
            Some(url) => f.write_str(&url),
            None => f.write_str(defaults::MEMORY_DATABASE),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosefitConfig {
    /// Where progress is stored
    pub database: DatabaseUrl,
    /// File holding writes that exhausted their retries
    pub pending_ops_path: PathBuf,
    /// Pose classification thresholds
    pub detection: DetectionThresholds,
    /// Tracker point and timing rules
    pub scoring: ScoringRules,
    /// Bonus points for unlocking an achievement
    pub achievement_points: i64,
    /// Backoff policy for progress writes
    pub retry: RetryPolicy,
}

impl Default for PosefitConfig {
    fn default() -> Self {
        Self {
            database: DatabaseUrl::default(),
            pending_ops_path: PathBuf::from(defaults::PENDING_OPS_PATH),
            detection: DetectionThresholds::default(),
            scoring: ScoringRules::default(),
            achievement_points: scoring::ACHIEVEMENT_POINTS,
            retry: RetryPolicy::default(),
        }
    }
}

impl PosefitConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let detection = defaults.detection.with_push_up_angles(
            env_parse_or(
                env_config::PUSHUP_TOP_ANGLE,
                defaults.detection.push_up_top_angle,
            ),
            env_parse_or(
                env_config::PUSHUP_BOTTOM_ANGLE,
                defaults.detection.push_up_bottom_angle,
            ),
        );

        let scoring = ScoringRules {
            points_per_pushup: env_parse_or(
                env_config::POINTS_PER_PUSHUP,
                defaults.scoring.points_per_pushup,
            ),
            min_award_interval_ms: env_parse_or(
                env_config::MIN_AWARD_INTERVAL_MS,
                defaults.scoring.min_award_interval_ms,
            ),
            plank_interval_ms: env_parse_or(
                env_config::PLANK_INTERVAL_MS,
                defaults.scoring.plank_interval_ms,
            ),
            ..defaults.scoring
        };

        let retry = RetryPolicy {
            max_attempts: env_parse_or(
                env_config::RETRY_MAX_ATTEMPTS,
                defaults.retry.max_attempts,
            ),
            base_delay_ms: env_parse_or(
                env_config::RETRY_BASE_DELAY_MS,
                defaults.retry.base_delay_ms,
            ),
            jitter_ms: env_parse_or(env_config::RETRY_JITTER_MS, defaults.retry.jitter_ms),
        };

        Self {
            database: env::var(env_config::DATABASE_URL)
                .map_or(defaults.database, |url| DatabaseUrl::parse_url(&url)),
            pending_ops_path: env::var(env_config::PENDING_OPS_PATH)
                .map_or(defaults.pending_ops_path, PathBuf::from),
            detection,
            scoring,
            achievement_points: env_parse_or(
                env_config::ACHIEVEMENT_POINTS,
                defaults.achievement_points,
            ),
            retry,
        }
    }

    /// Reject settings the trackers cannot work with
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        if self.detection.push_up_bottom_angle >= self.detection.push_up_top_angle {
            return Err(AppError::config(format!(
                "Push-up bottom angle ({}) must be below the top angle ({})",
                self.detection.push_up_bottom_angle, self.detection.push_up_top_angle
            )));
        }
        if self.scoring.plank_interval_ms < 1000 {
            return Err(AppError::config(format!(
                "Plank interval must be at least 1000 ms, got {}",
                self.scoring.plank_interval_ms
            )));
        }
        if self.scoring.min_award_interval_ms < 0 {
            return Err(AppError::config("Award interval cannot be negative"));
        }
        if self.retry.max_attempts == 0 {
            return Err(AppError::config("Retry policy needs at least one attempt"));
        }
        Ok(())
    }

    /// One-line description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} top_angle={} bottom_angle={} award_interval_ms={} retries={}",
            self.database,
            self.detection.push_up_top_angle,
            self.detection.push_up_bottom_angle,
            self.scoring.min_award_interval_ms,
            self.retry.max_attempts
        )
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Invalid configuration value, using default");
            default
        }),
        Err(_) => default,
    }
}
