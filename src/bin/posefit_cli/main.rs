// ABOUTME: Posefit CLI - replays recorded pose frames and inspects user progress
// ABOUTME: Handles session replay, leaderboard, achievements, and daily challenge commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Replay a recorded push-up session (one JSON pose frame per line)
//! posefit-cli replay --user u1 --exercise pushup --frames session.jsonl
//!
//! # Replay 12 synthetic push-ups
//! posefit-cli replay --user u1 --exercise pushup --synthetic 12
//!
//! # Show the top 10 users
//! posefit-cli leaderboard --limit 10
//!
//! # Show a user's achievements
//! posefit-cli achievements --user u1
//!
//! # Daily challenges
//! posefit-cli challenge generate --user u1
//! posefit-cli challenge list --user u1
//! posefit-cli challenge progress --user u1 --exercise plank --count 45
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use posefit::config::{DatabaseUrl, PosefitConfig};
use posefit::logging::LoggingConfig;
use posefit::models::{ExerciseType, UserIdentity};
use posefit::services::Services;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "posefit-cli",
    about = "Posefit exercise tracking CLI",
    long_about = "Replay recorded pose sessions through the exercise trackers and inspect points, achievements, challenges, and the leaderboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (`memory` for an ephemeral store)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Feed pose frames through a workout session
    Replay {
        /// User to credit
        #[arg(long)]
        user: String,

        /// Leaderboard name (defaults to the user id)
        #[arg(long)]
        name: Option<String>,

        /// Exercise to track (pushup, plank)
        #[arg(long)]
        exercise: ExerciseType,

        /// JSON lines file with one pose frame per line
        #[arg(long, conflicts_with = "synthetic")]
        frames: Option<PathBuf>,

        /// Generate frames instead: push-up repetitions or plank seconds
        #[arg(long)]
        synthetic: Option<u32>,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show a user's achievements
    Achievements {
        /// User to show
        #[arg(long)]
        user: String,
    },

    /// Daily challenge commands
    Challenge {
        #[command(subcommand)]
        action: ChallengeCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ChallengeCommand {
    /// Issue a challenge if the user has no open one
    Generate {
        /// User to issue the challenge to
        #[arg(long)]
        user: String,

        /// Issue a new challenge even if one is open
        #[arg(long)]
        force: bool,
    },

    /// List a user's challenges, open ones first
    List {
        /// User to list
        #[arg(long)]
        user: String,
    },

    /// Record progress towards the open challenge
    Progress {
        /// User to credit
        #[arg(long)]
        user: String,

        /// Leaderboard name (defaults to the user id)
        #[arg(long)]
        name: Option<String>,

        /// Exercise performed
        #[arg(long)]
        exercise: ExerciseType,

        /// Repetitions, or seconds for planks
        #[arg(long)]
        count: u32,
    },
}

fn identity(user: String, name: Option<String>) -> UserIdentity {
    let display_name = name.unwrap_or_else(|| user.clone());
    UserIdentity::new(user, display_name)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env().with_stderr();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging.init()?;

    let mut config = PosefitConfig::from_env();
    if let Some(url) = cli.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(url);
    }
    config.validate()?;
    info!(config = %config.summary(), "Posefit CLI");

    let services = Services::from_config(&config).await?;

    match cli.command {
        Command::Replay {
            user,
            name,
            exercise,
            frames,
            synthetic,
        } => {
            commands::replay::run(&services, identity(user, name), exercise, frames, synthetic)
                .await?;
        }
        Command::Leaderboard { limit } => {
            commands::progress::leaderboard(&services, limit).await?;
        }
        Command::Achievements { user } => {
            commands::progress::achievements(&services, &user).await?;
        }
        Command::Challenge { action } => match action {
            ChallengeCommand::Generate { user, force } => {
                commands::challenge::generate(&services, &user, force).await?;
            }
            ChallengeCommand::List { user } => {
                commands::challenge::list(&services, &user).await?;
            }
            ChallengeCommand::Progress {
                user,
                name,
                exercise,
                count,
            } => {
                commands::challenge::progress(&services, &identity(user, name), exercise, count)
                    .await?;
            }
        },
    }

    Ok(())
}
