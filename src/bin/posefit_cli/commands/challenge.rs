// ABOUTME: Daily challenge commands for posefit-cli
// ABOUTME: Handles generate, list, and progress operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use posefit::models::{ExerciseType, UserIdentity};
use posefit::services::Services;
use tracing::info;

use crate::helpers::display::{display_challenge, display_challenges};

/// Issue a challenge unless one is open; `force` always issues one
pub async fn generate(services: &Services, user_id: &str, force: bool) -> Result<()> {
    let issued = if force {
        Some(services.challenges.generate(user_id).await?)
    } else {
        services.challenges.check_and_generate(user_id).await?
    };

    match issued {
        Some(challenge) => display_challenge(&challenge),
        None => {
            info!(user.id = %user_id, "Open challenge exists");
            if let Some(current) = services.challenges.current(user_id).await? {
                println!("An open challenge already exists:");
                display_challenge(&current);
            }
        }
    }
    Ok(())
}

/// List a user's challenges
pub async fn list(services: &Services, user_id: &str) -> Result<()> {
    let challenges = services.challenges.list(user_id).await?;
    display_challenges(user_id, &challenges);
    Ok(())
}

/// Record progress towards the open challenge
pub async fn progress(
    services: &Services,
    user: &UserIdentity,
    exercise: ExerciseType,
    count: u32,
) -> Result<()> {
    services.scoring.ensure_profile(user).await?;
    match services
        .challenges
        .update_progress(user, exercise, count)
        .await?
    {
        Some(progress) => println!("Challenge progress: {progress}%"),
        None => println!("No open {exercise} challenge for {}", user.user_id),
    }
    Ok(())
}
