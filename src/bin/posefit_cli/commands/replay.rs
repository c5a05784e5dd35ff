// ABOUTME: Replay command for posefit-cli
// ABOUTME: Feeds recorded or synthetic pose frames through a workout session and prints the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Context, Result};
use posefit::detection::fixtures;
use posefit::models::{ExerciseType, PoseFrame, UserIdentity};
use posefit::services::Services;
use posefit::session::{FrameOutcome, WorkoutSession};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::helpers::display::{display_profile, display_replay_summary};

const SYNTHETIC_STEP_MS: i64 = 400;

/// Replay frames for one user and exercise
pub async fn run(
    services: &Services,
    user: UserIdentity,
    exercise: ExerciseType,
    frames: Option<PathBuf>,
    synthetic: Option<u32>,
) -> Result<()> {
    let frames = match (frames, synthetic) {
        (Some(path), _) => load_frames(&path).await?,
        (None, Some(amount)) => synthetic_frames(exercise, amount),
        (None, None) => bail!("Provide --frames <file> or --synthetic <amount>"),
    };
    info!(frames = frames.len(), exercise = %exercise, "Replaying session");

    let end_ms = frames.last().map_or(0, |f| f.timestamp_ms);
    let user_id = user.user_id.clone();
    let session = WorkoutSession::start(user, exercise, services.clone()).await?;

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut events = 0usize;
    for frame in &frames {
        match session.process_frame(frame).await? {
            FrameOutcome::Processed(emitted) => {
                processed += 1;
                events += emitted.len();
            }
            FrameOutcome::Skipped => skipped += 1,
        }
    }

    let record = session.finish(end_ms).await?;
    display_replay_summary(processed, skipped, events, record.as_ref());

    if let Some(profile) = services.scoring.store().get_profile(&user_id).await? {
        display_profile(&profile);
    }
    Ok(())
}

async fn load_frames(path: &Path) -> Result<Vec<PoseFrame>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open frames file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut frames = Vec::new();
    let mut line_number = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PoseFrame>(&line) {
            Ok(frame) => frames.push(frame),
            Err(e) => warn!(line = line_number, error = %e, "Skipping malformed frame"),
        }
    }
    Ok(frames)
}

fn synthetic_frames(exercise: ExerciseType, amount: u32) -> Vec<PoseFrame> {
    match exercise {
        ExerciseType::Plank => fixtures::plank_hold(0, amount, SYNTHETIC_STEP_MS),
        _ => fixtures::push_up_reps(amount, 0, SYNTHETIC_STEP_MS),
    }
}
