// ABOUTME: Daily workout streak calculation on UTC calendar days
// ABOUTME: Pure function over the previous workout time so it can be tested without a store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Days, NaiveTime, Utc};

/// New workout state after a saved session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// Value to store as the last workout time
    pub last_workout: DateTime<Utc>,
    /// Value to store as the workout streak
    pub streak: u32,
}

fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Compute the streak after a session saved at `now`
///
/// Returns `None` when the user already worked out today; the stored state
/// stays as it is. A workout yesterday extends the streak, anything older
/// starts a new one.
#[must_use]
pub fn next_streak(
    last_workout: Option<DateTime<Utc>>,
    current_streak: u32,
    now: DateTime<Utc>,
) -> Option<StreakUpdate> {
    let today = start_of_day(now);
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

    let streak = match last_workout {
        Some(last) if last >= today => return None,
        Some(last) if last >= yesterday => current_streak.saturating_add(1),
        Some(_) => 1,
        None => current_streak.saturating_add(1),
    };

    Some(StreakUpdate {
        last_workout: now,
        streak,
    })
}
