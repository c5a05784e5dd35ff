// ABOUTME: Progress inspection commands for posefit-cli
// ABOUTME: Prints the leaderboard and a user's achievements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use posefit::services::Services;

use crate::helpers::display::{display_achievements, display_leaderboard};

/// Print the top `limit` rankings
pub async fn leaderboard(services: &Services, limit: usize) -> Result<()> {
    let rankings = services.leaderboard.top(Some(limit)).await?;
    display_leaderboard(&rankings);
    Ok(())
}

/// Print a user's achievements, locked ones included
pub async fn achievements(services: &Services, user_id: &str) -> Result<()> {
    let achievements = services.achievements.list(user_id).await?;
    display_achievements(user_id, &achievements);
    Ok(())
}
