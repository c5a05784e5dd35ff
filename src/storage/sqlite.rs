// ABOUTME: SQLite progress store built on an sqlx connection pool
// ABOUTME: Creates its schema on connect and applies increments with single UPDATE statements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProgressStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use posefit_core::errors::{AppError, AppResult};
use posefit_core::models::{
    Achievement, Attribute, Attributes, DailyChallenge, ExerciseDelta, ExerciseType,
    LeaderboardDelta, PlankStats, PushUpStats, SessionRecord, UserProfile, UserRanking,
    WorkoutAnalytics,
};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Progress store persisted in `SQLite`
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and run migrations
    ///
    /// File databases are created if missing. An in-memory database is pinned
    /// to a single connection so every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let connection_options = if database_url.starts_with("sqlite:") && !in_memory {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let max_connections = if in_memory { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Wrap an existing pool; the caller is responsible for running [`Self::migrate`]
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                total_points INTEGER NOT NULL DEFAULT 0,
                strength REAL NOT NULL,
                agility REAL NOT NULL,
                stamina REAL NOT NULL,
                pushup_count INTEGER NOT NULL DEFAULT 0,
                pushup_points INTEGER NOT NULL DEFAULT 0,
                pushup_best_streak INTEGER NOT NULL DEFAULT 0,
                plank_points INTEGER NOT NULL DEFAULT 0,
                plank_total_seconds INTEGER NOT NULL DEFAULT 0,
                plank_best_duration INTEGER NOT NULL DEFAULT 0,
                last_workout TEXT,
                total_calories_burned REAL NOT NULL DEFAULT 0,
                workout_streak INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profiles table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES profiles(user_id),
                exercise TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                count INTEGER NOT NULL,
                points_earned INTEGER NOT NULL,
                max_consecutive_reps INTEGER NOT NULL,
                calories_burned REAL NOT NULL,
                duration_secs INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create sessions table: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_sessions_user
            ON workout_sessions(user_id, recorded_at)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create sessions index: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS rankings (
                user_id TEXT PRIMARY KEY,
                user_name TEXT NOT NULL,
                pushup_points INTEGER NOT NULL DEFAULT 0,
                crunch_points INTEGER NOT NULL DEFAULT 0,
                plank_points INTEGER NOT NULL DEFAULT 0,
                total_points INTEGER NOT NULL DEFAULT 0,
                achievement_count INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create rankings table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                user_id TEXT NOT NULL,
                achievement_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                unlocked INTEGER NOT NULL DEFAULT 0,
                unlocked_at TEXT,
                value INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, achievement_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create achievements table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_challenges (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                exercise TEXT NOT NULL,
                target INTEGER NOT NULL,
                points_reward INTEGER NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                completed_at TEXT,
                progress INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenges table: {e}")))?;

        debug!("SQLite progress schema ready");
        Ok(())
    }

    async fn update_profile_returning(
        &self,
        sql: &str,
        amount: i64,
        user_id: &str,
        action: &str,
    ) -> AppResult<i64> {
        let row = sqlx::query(sql)
            .bind(amount)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to {action}: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        Ok(row.try_get(0)?)
    }
}

#[async_trait]
impl ProgressStore for SqliteStore {
    async fn ensure_profile(&self, user_id: &str, display_name: &str) -> AppResult<UserProfile> {
        let defaults = Attributes::default();
        sqlx::query(
            r"
            INSERT OR IGNORE INTO profiles (user_id, display_name, strength, agility, stamina)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user_id)
        .bind(display_name)
        .bind(defaults.strength)
        .bind(defaults.agility)
        .bind(defaults.stamina)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profile: {e}")))?;

        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Profile for {user_id} vanished after insert")))
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, display_name, total_points, strength, agility, stamina,
                   pushup_count, pushup_points, pushup_best_streak,
                   plank_points, plank_total_seconds, plank_best_duration,
                   last_workout, total_calories_burned, workout_streak
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    async fn apply_exercise_delta(&self, user_id: &str, delta: &ExerciseDelta) -> AppResult<()> {
        let result = match *delta {
            ExerciseDelta::PushUp {
                reps,
                points,
                calories,
            } => {
                sqlx::query(
                    r"
                    UPDATE profiles
                    SET pushup_count = pushup_count + $1,
                        pushup_points = pushup_points + $2,
                        total_calories_burned = total_calories_burned + $3,
                        total_points = total_points + $2
                    WHERE user_id = $4
                    ",
                )
                .bind(i64::from(reps))
                .bind(points)
                .bind(calories)
                .bind(user_id)
                .execute(&self.pool)
                .await
            }
            ExerciseDelta::Plank { points, seconds } => {
                sqlx::query(
                    r"
                    UPDATE profiles
                    SET plank_points = plank_points + $1,
                        plank_total_seconds = plank_total_seconds + $2,
                        total_points = total_points + $1
                    WHERE user_id = $3
                    ",
                )
                .bind(points)
                .bind(i64::from(seconds))
                .bind(user_id)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to apply exercise update: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Profile for user {user_id}")));
        }
        Ok(())
    }

    async fn add_total_points(&self, user_id: &str, points: i64) -> AppResult<i64> {
        self.update_profile_returning(
            "UPDATE profiles SET total_points = total_points + $1 WHERE user_id = $2 RETURNING total_points",
            points,
            user_id,
            "add total points",
        )
        .await
    }

    async fn adjust_attribute(
        &self,
        user_id: &str,
        attribute: Attribute,
        amount: f32,
    ) -> AppResult<f32> {
        let column = attribute.as_str();
        let sql = format!(
            "UPDATE profiles SET {column} = {column} + $1 WHERE user_id = $2 RETURNING {column}"
        );
        let row = sqlx::query(&sql)
            .bind(amount)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to adjust {attribute}: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        Ok(row.try_get(0)?)
    }

    async fn raise_best_streak(&self, user_id: &str, streak: u32) -> AppResult<u32> {
        let best = self
            .update_profile_returning(
                "UPDATE profiles SET pushup_best_streak = MAX(pushup_best_streak, $1) WHERE user_id = $2 RETURNING pushup_best_streak",
                i64::from(streak),
                user_id,
                "raise best streak",
            )
            .await?;
        Ok(best as u32)
    }

    async fn raise_best_plank_duration(
        &self,
        user_id: &str,
        duration_secs: u32,
    ) -> AppResult<u32> {
        let best = self
            .update_profile_returning(
                "UPDATE profiles SET plank_best_duration = MAX(plank_best_duration, $1) WHERE user_id = $2 RETURNING plank_best_duration",
                i64::from(duration_secs),
                user_id,
                "raise best plank duration",
            )
            .await?;
        Ok(best as u32)
    }

    async fn set_workout_state(
        &self,
        user_id: &str,
        last_workout: DateTime<Utc>,
        streak: u32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles SET last_workout = $1, workout_streak = $2
            WHERE user_id = $3
            ",
        )
        .bind(last_workout.to_rfc3339())
        .bind(i64::from(streak))
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout state: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Profile for user {user_id}")));
        }
        Ok(())
    }

    async fn record_session(&self, user_id: &str, record: &SessionRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workout_sessions (
                id, user_id, exercise, recorded_at, count, points_earned,
                max_consecutive_reps, calories_burned, duration_secs
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id)
        .bind(record.exercise.as_str())
        .bind(record.recorded_at.to_rfc3339())
        .bind(i64::from(record.count))
        .bind(record.points_earned)
        .bind(i64::from(record.max_consecutive_reps))
        .bind(record.calories_burned)
        .bind(i64::from(record.duration_secs))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record session: {e}")))?;
        Ok(())
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        exercise: Option<ExerciseType>,
    ) -> AppResult<Vec<SessionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, exercise, recorded_at, count, points_earned,
                   max_consecutive_reps, calories_burned, duration_secs
            FROM workout_sessions
            WHERE user_id = $1 AND ($2 IS NULL OR exercise = $2)
            ORDER BY recorded_at DESC
            ",
        )
        .bind(user_id)
        .bind(exercise.map(|e| e.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sessions: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn apply_leaderboard_delta(
        &self,
        user_id: &str,
        delta: &LeaderboardDelta,
    ) -> AppResult<()> {
        let (pushup, plank, crunch) = match delta.exercise {
            Some(ExerciseType::PushUp) => (delta.points, 0, 0),
            Some(ExerciseType::Plank) => (0, delta.points, 0),
            Some(ExerciseType::Crunch) => (0, 0, delta.points),
            None => (0, 0, 0),
        };

        sqlx::query(
            r"
            INSERT INTO rankings (
                user_id, user_name, pushup_points, plank_points, crunch_points,
                total_points, achievement_count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(user_id) DO UPDATE SET
                user_name = excluded.user_name,
                pushup_points = pushup_points + excluded.pushup_points,
                plank_points = plank_points + excluded.plank_points,
                crunch_points = crunch_points + excluded.crunch_points,
                total_points = total_points + excluded.total_points,
                achievement_count = achievement_count + excluded.achievement_count
            ",
        )
        .bind(user_id)
        .bind(&delta.user_name)
        .bind(pushup)
        .bind(plank)
        .bind(crunch)
        .bind(delta.points)
        .bind(i64::from(delta.achievements))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update leaderboard: {e}")))?;
        Ok(())
    }

    async fn set_achievement_count(&self, user_id: &str, count: u32) -> AppResult<()> {
        let result = sqlx::query("UPDATE rankings SET achievement_count = $1 WHERE user_id = $2")
            .bind(i64::from(count))
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set achievement count: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Ranking for user {user_id}")));
        }
        Ok(())
    }

    async fn top_rankings(&self, limit: usize) -> AppResult<Vec<UserRanking>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, user_name, pushup_points, crunch_points, plank_points,
                   total_points, achievement_count
            FROM rankings
            ORDER BY total_points DESC, user_name ASC
            LIMIT $1
            ",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load rankings: {e}")))?;

        rows.iter().map(row_to_ranking).collect()
    }

    async fn unlock_achievement(
        &self,
        user_id: &str,
        achievement: &Achievement,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO achievements (
                user_id, achievement_id, title, description, category,
                unlocked, unlocked_at, value
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(user_id, achievement_id) DO UPDATE SET
                unlocked = excluded.unlocked,
                unlocked_at = excluded.unlocked_at,
                value = excluded.value
            WHERE achievements.unlocked = 0
            ",
        )
        .bind(user_id)
        .bind(&achievement.id)
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(achievement.category.as_str())
        .bind(achievement.unlocked)
        .bind(achievement.unlocked_at.map(|t| t.to_rfc3339()))
        .bind(i64::from(achievement.value))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to unlock achievement: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_missing_achievements(
        &self,
        user_id: &str,
        locked: &[Achievement],
    ) -> AppResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let mut added = 0;
        for achievement in locked {
            let result = sqlx::query(
                r"
                INSERT OR IGNORE INTO achievements (
                    user_id, achievement_id, title, description, category, unlocked, value
                ) VALUES ($1, $2, $3, $4, $5, 0, 0)
                ",
            )
            .bind(user_id)
            .bind(&achievement.id)
            .bind(&achievement.title)
            .bind(&achievement.description)
            .bind(achievement.category.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to initialize achievement: {e}")))?;
            added += result.rows_affected() as usize;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit achievements: {e}")))?;
        Ok(added)
    }

    async fn list_achievements(&self, user_id: &str) -> AppResult<Vec<Achievement>> {
        let rows = sqlx::query(
            r"
            SELECT achievement_id, title, description, category, unlocked, unlocked_at, value
            FROM achievements
            WHERE user_id = $1
            ORDER BY achievement_id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list achievements: {e}")))?;

        rows.iter().map(row_to_achievement).collect()
    }

    async fn insert_challenge(&self, user_id: &str, challenge: &DailyChallenge) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO daily_challenges (
                id, user_id, title, description, exercise, target, points_reward,
                completed, created_at, completed_at, progress
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(challenge.id.to_string())
        .bind(user_id)
        .bind(&challenge.title)
        .bind(&challenge.description)
        .bind(challenge.exercise.as_str())
        .bind(i64::from(challenge.target))
        .bind(challenge.points_reward)
        .bind(challenge.completed)
        .bind(challenge.created_at.to_rfc3339())
        .bind(challenge.completed_at.map(|t| t.to_rfc3339()))
        .bind(i64::from(challenge.progress))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenge: {e}")))?;
        Ok(())
    }

    async fn list_challenges(&self, user_id: &str) -> AppResult<Vec<DailyChallenge>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, exercise, target, points_reward,
                   completed, created_at, completed_at, progress
            FROM daily_challenges
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list challenges: {e}")))?;

        rows.iter().map(row_to_challenge).collect()
    }

    async fn update_challenge_progress(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        progress: u8,
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE daily_challenges SET progress = $1 WHERE id = $2 AND user_id = $3")
                .bind(i64::from(progress.min(100)))
                .bind(challenge_id.to_string())
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to update challenge progress: {e}"))
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Challenge {challenge_id}")));
        }
        Ok(())
    }

    async fn complete_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE daily_challenges
            SET completed = 1, progress = 100, completed_at = $1
            WHERE id = $2 AND user_id = $3 AND completed = 0
            ",
        )
        .bind(completed_at.to_rfc3339())
        .bind(challenge_id.to_string())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to complete challenge: {e}")))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists = sqlx::query("SELECT 1 FROM daily_challenges WHERE id = $1 AND user_id = $2")
            .bind(challenge_id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up challenge: {e}")))?;
        match exists {
            Some(_) => Ok(false),
            None => Err(AppError::not_found(format!("Challenge {challenge_id}"))),
        }
    }
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

fn parse_optional_timestamp(value: Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_timestamp).transpose()
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    let pushup_count: i64 = row.try_get("pushup_count")?;
    let best_streak: i64 = row.try_get("pushup_best_streak")?;
    let plank_seconds: i64 = row.try_get("plank_total_seconds")?;
    let plank_best: i64 = row.try_get("plank_best_duration")?;
    let workout_streak: i64 = row.try_get("workout_streak")?;

    Ok(UserProfile {
        user_id: row.try_get("user_id")?,
        display_name: row.try_get("display_name")?,
        total_points: row.try_get("total_points")?,
        attributes: Attributes {
            strength: row.try_get("strength")?,
            agility: row.try_get("agility")?,
            stamina: row.try_get("stamina")?,
        },
        push_ups: PushUpStats {
            count: pushup_count as u32,
            points: row.try_get("pushup_points")?,
            best_streak: best_streak as u32,
        },
        plank: PlankStats {
            points: row.try_get("plank_points")?,
            total_seconds: plank_seconds as u32,
            best_duration_secs: plank_best as u32,
        },
        analytics: WorkoutAnalytics {
            last_workout: parse_optional_timestamp(row.try_get("last_workout")?)?,
            total_calories_burned: row.try_get("total_calories_burned")?,
            workout_streak: workout_streak as u32,
        },
    })
}

fn row_to_session(row: &SqliteRow) -> AppResult<SessionRecord> {
    let id: String = row.try_get("id")?;
    let exercise: String = row.try_get("exercise")?;
    let recorded_at: String = row.try_get("recorded_at")?;
    let count: i64 = row.try_get("count")?;
    let max_consecutive: i64 = row.try_get("max_consecutive_reps")?;
    let duration: i64 = row.try_get("duration_secs")?;

    Ok(SessionRecord {
        id: parse_uuid(&id)?,
        exercise: exercise.parse()?,
        recorded_at: parse_timestamp(&recorded_at)?,
        count: count as u32,
        points_earned: row.try_get("points_earned")?,
        max_consecutive_reps: max_consecutive as u32,
        calories_burned: row.try_get("calories_burned")?,
        duration_secs: duration as u32,
    })
}

fn row_to_ranking(row: &SqliteRow) -> AppResult<UserRanking> {
    let achievement_count: i64 = row.try_get("achievement_count")?;
    Ok(UserRanking {
        user_id: row.try_get("user_id")?,
        user_name: row.try_get("user_name")?,
        push_up_points: row.try_get("pushup_points")?,
        crunch_points: row.try_get("crunch_points")?,
        plank_points: row.try_get("plank_points")?,
        total_points: row.try_get("total_points")?,
        achievement_count: achievement_count as u32,
    })
}

fn row_to_achievement(row: &SqliteRow) -> AppResult<Achievement> {
    let category: String = row.try_get("category")?;
    let unlocked: i64 = row.try_get("unlocked")?;
    let value: i64 = row.try_get("value")?;

    Ok(Achievement {
        id: row.try_get("achievement_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: category.parse()?,
        unlocked: unlocked == 1,
        unlocked_at: parse_optional_timestamp(row.try_get("unlocked_at")?)?,
        value: value as u32,
    })
}

fn row_to_challenge(row: &SqliteRow) -> AppResult<DailyChallenge> {
    let id: String = row.try_get("id")?;
    let exercise: String = row.try_get("exercise")?;
    let target: i64 = row.try_get("target")?;
    let completed: i64 = row.try_get("completed")?;
    let created_at: String = row.try_get("created_at")?;
    let progress: i64 = row.try_get("progress")?;

    Ok(DailyChallenge {
        id: parse_uuid(&id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        exercise: exercise.parse()?,
        target: target as u32,
        points_reward: row.try_get("points_reward")?,
        completed: completed == 1,
        created_at: parse_timestamp(&created_at)?,
        completed_at: parse_optional_timestamp(row.try_get("completed_at")?)?,
        progress: progress.clamp(0, 100) as u8,
    })
}
