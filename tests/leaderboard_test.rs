// ABOUTME: Integration tests for leaderboard ordering and positions
// ABOUTME: Rankings sort by total points with names breaking ties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use posefit::models::{ExerciseType, LeaderboardDelta, UserIdentity};

#[tokio::test]
async fn test_rankings_sorted_by_total_then_name() {
    let (services, _store, _dir) = common::create_test_services();
    let store = services.scoring.store();

    for (user_id, name, points) in [
        ("u1", "Zoe", 30),
        ("u2", "Adam", 50),
        ("u3", "Beth", 30),
    ] {
        store
            .apply_leaderboard_delta(
                user_id,
                &LeaderboardDelta::exercise(name, ExerciseType::PushUp, points),
            )
            .await
            .unwrap();
    }

    let names: Vec<String> = services
        .leaderboard
        .top(None)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.user_name)
        .collect();
    assert_eq!(names, vec!["Adam", "Beth", "Zoe"]);

    let top_two = services.leaderboard.top(Some(2)).await.unwrap();
    assert_eq!(top_two.len(), 2);

    assert_eq!(services.leaderboard.position("u3").await.unwrap(), Some(2));
    assert_eq!(services.leaderboard.position("u1").await.unwrap(), Some(3));
    assert_eq!(services.leaderboard.position("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_exercise_points_accumulate_per_column() {
    let (services, _store, _dir) = common::create_test_services();
    let user = UserIdentity::new("u1", "Sam");
    services.scoring.ensure_profile(&user).await.unwrap();

    services
        .scoring
        .award_push_ups(&user, 4, 2, 2, 0.8)
        .await
        .unwrap();
    services
        .scoring
        .award_plank_intervals(&user, 3, 3, 6)
        .await
        .unwrap();

    let ranking = services.leaderboard.top(None).await.unwrap().remove(0);
    assert_eq!(ranking.user_id, "u1");
    assert_eq!(ranking.user_name, "Sam");
    assert_eq!(ranking.push_up_points, 4);
    assert_eq!(ranking.plank_points, 3);
    assert_eq!(ranking.crunch_points, 0);
    assert_eq!(ranking.total_points, 7);
}

#[tokio::test]
async fn test_latest_display_name_wins() {
    let (services, _store, _dir) = common::create_test_services();
    let store = services.scoring.store();

    store
        .apply_leaderboard_delta("u1", &LeaderboardDelta::bonus("Old name", 5))
        .await
        .unwrap();
    store
        .apply_leaderboard_delta("u1", &LeaderboardDelta::bonus("New name", 5))
        .await
        .unwrap();

    let rankings = services.leaderboard.top(None).await.unwrap();
    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].user_name, "New name");
    assert_eq!(rankings[0].total_points, 10);
}
