// ABOUTME: Integration tests for the daily challenge lifecycle
// ABOUTME: Covers generation, progress tracking, completion rewards, and regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use posefit::models::ExerciseType;
use posefit::services::challenges::{build_challenge, reward_for};

#[tokio::test]
async fn test_check_and_generate_keeps_one_open_challenge() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("alice");
    services.scoring.ensure_profile(&user).await.unwrap();

    let first = services
        .challenges
        .check_and_generate("alice")
        .await
        .unwrap()
        .unwrap();
    assert!(!first.completed);
    assert_eq!(first.progress, 0);
    assert_eq!(first.points_reward, reward_for(first.exercise, first.target));

    assert!(services
        .challenges
        .check_and_generate("alice")
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        services.challenges.current("alice").await.unwrap().map(|c| c.id),
        Some(first.id)
    );
}

#[tokio::test]
async fn test_progress_ignores_other_exercises() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("bob");
    services.scoring.ensure_profile(&user).await.unwrap();
    services
        .challenges
        .insert("bob", build_challenge(ExerciseType::Plank, 60, Utc::now()))
        .await
        .unwrap();

    assert_eq!(
        services
            .challenges
            .update_progress(&user, ExerciseType::PushUp, 50)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        services
            .challenges
            .update_progress(&user, ExerciseType::Plank, 30)
            .await
            .unwrap(),
        Some(50)
    );

    let current = services.challenges.current("bob").await.unwrap().unwrap();
    assert_eq!(current.progress, 50);
    assert!(!current.completed);
}

#[tokio::test]
async fn test_meeting_target_completes_and_pays_reward() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("carol");
    services.scoring.ensure_profile(&user).await.unwrap();
    let challenge = services
        .challenges
        .insert(
            "carol",
            build_challenge(ExerciseType::PushUp, 10, Utc::now()),
        )
        .await
        .unwrap();
    assert_eq!(challenge.points_reward, 20);

    assert_eq!(
        services
            .challenges
            .update_progress(&user, ExerciseType::PushUp, 12)
            .await
            .unwrap(),
        Some(100)
    );

    let store = services.scoring.store();
    let challenges = store.list_challenges("carol").await.unwrap();
    let completed = challenges.iter().find(|c| c.id == challenge.id).unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.progress, 100);

    let profile = store.get_profile("carol").await.unwrap().unwrap();
    assert_eq!(profile.total_points, 20);
    let rankings = services.leaderboard.top(None).await.unwrap();
    assert_eq!(rankings[0].total_points, 20);
    assert_eq!(rankings[0].achievement_count, 0);

    // The next challenge is issued right away
    let next = services.challenges.current("carol").await.unwrap().unwrap();
    assert_ne!(next.id, challenge.id);
}

#[tokio::test]
async fn test_completing_twice_pays_once() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("dave");
    services.scoring.ensure_profile(&user).await.unwrap();
    let challenge = services
        .challenges
        .insert("dave", build_challenge(ExerciseType::Plank, 30, Utc::now()))
        .await
        .unwrap();

    assert!(services
        .challenges
        .complete(&user, challenge.id)
        .await
        .unwrap());
    assert!(!services
        .challenges
        .complete(&user, challenge.id)
        .await
        .unwrap());

    let profile = services
        .scoring
        .store()
        .get_profile("dave")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_points, reward_for(ExerciseType::Plank, 30));
}

#[tokio::test]
async fn test_complete_unknown_challenge_fails() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("erin");
    services.scoring.ensure_profile(&user).await.unwrap();

    assert!(services
        .challenges
        .complete(&user, uuid::Uuid::new_v4())
        .await
        .is_err());
}

#[tokio::test]
async fn test_list_puts_open_challenges_first() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("frank");
    services.scoring.ensure_profile(&user).await.unwrap();
    let done = services
        .challenges
        .insert(
            "frank",
            build_challenge(ExerciseType::Crunch, 10, Utc::now()),
        )
        .await
        .unwrap();
    services.challenges.complete(&user, done.id).await.unwrap();

    let listed = services.challenges.list("frank").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(!listed[0].completed);
    assert!(listed[1].completed);
    assert_eq!(listed[1].id, done.id);
}
