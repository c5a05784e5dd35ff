// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for posefit-cli
// ABOUTME: Provides consistent display functions for sessions, rankings, achievements, and challenges

use posefit::models::{Achievement, DailyChallenge, SessionRecord, UserProfile, UserRanking};

/// Display the outcome of a replay
pub fn display_replay_summary(
    processed: usize,
    skipped: usize,
    events: usize,
    record: Option<&SessionRecord>,
) {
    println!("\nReplay complete");
    println!("{}", "=".repeat(50));
    println!("   Frames processed: {processed}");
    println!("   Frames skipped:   {skipped}");
    println!("   Events:           {events}");

    match record {
        Some(record) => {
            println!("\nLast saved session ({}):", record.exercise);
            println!("   Count:            {}", record.count);
            println!("   Points earned:    {}", record.points_earned);
            println!("   Best run:         {}", record.max_consecutive_reps);
            println!("   Calories:         {:.1}", record.calories_burned);
            println!("   Duration:         {} s", record.duration_secs);
        }
        None => println!("\nNo open session to save at the end of the replay"),
    }
}

/// Display a user's profile totals
pub fn display_profile(profile: &UserProfile) {
    println!("\nProfile: {} ({})", profile.display_name, profile.user_id);
    println!("{}", "-".repeat(50));
    println!("   Total points:     {}", profile.total_points);
    println!(
        "   Attributes:       strength {:.1}, agility {:.1}, stamina {:.1}",
        profile.attributes.strength, profile.attributes.agility, profile.attributes.stamina
    );
    println!(
        "   Push-ups:         {} reps, {} points, best run {}",
        profile.push_ups.count, profile.push_ups.points, profile.push_ups.best_streak
    );
    println!(
        "   Plank:            {} s, {} points, best hold {} s",
        profile.plank.total_seconds, profile.plank.points, profile.plank.best_duration_secs
    );
    println!("   Workout streak:   {} day(s)", profile.analytics.workout_streak);
}

/// Display leaderboard rows
pub fn display_leaderboard(rankings: &[UserRanking]) {
    if rankings.is_empty() {
        println!("Leaderboard is empty");
        return;
    }

    println!(
        "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "#", "Name", "Total", "Push-up", "Plank", "Crunch", "Badges"
    );
    println!("{}", "=".repeat(72));
    for (position, ranking) in rankings.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8} {:>6}",
            position + 1,
            ranking.user_name,
            ranking.total_points,
            ranking.push_up_points,
            ranking.plank_points,
            ranking.crunch_points,
            ranking.achievement_count
        );
    }
}

/// Display achievements with their lock state
pub fn display_achievements(user_id: &str, achievements: &[Achievement]) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    println!(
        "\nAchievements for {user_id}: {unlocked}/{} unlocked",
        achievements.len()
    );
    println!("{}", "=".repeat(60));
    for achievement in achievements {
        let marker = if achievement.unlocked { "[x]" } else { "[ ]" };
        print!("{marker} {:<20} {}", achievement.title, achievement.description);
        if let Some(at) = achievement.unlocked_at {
            print!(" (unlocked {})", at.format("%Y-%m-%d %H:%M UTC"));
        }
        println!();
    }
}

/// Display one challenge
pub fn display_challenge(challenge: &DailyChallenge) {
    let status = if challenge.completed { "done" } else { "open" };
    println!(
        "[{status}] {} - {} ({}%, reward {} points)",
        challenge.title, challenge.description, challenge.progress, challenge.points_reward
    );
}

/// Display a user's challenges
pub fn display_challenges(user_id: &str, challenges: &[DailyChallenge]) {
    if challenges.is_empty() {
        println!("No challenges for {user_id}");
        return;
    }
    println!("\nChallenges for {user_id}");
    println!("{}", "=".repeat(60));
    for challenge in challenges {
        display_challenge(challenge);
    }
}
