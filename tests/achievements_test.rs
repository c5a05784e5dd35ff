// ABOUTME: Integration tests for achievement unlocking and listing
// ABOUTME: Validates one-time unlocks, bonus points, catalog merging, and leaderboard counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use posefit::constants::achievements::CATALOG;
use posefit::constants::scoring::ACHIEVEMENT_POINTS;
use posefit::errors::ErrorCode;
use posefit::models::AchievementCategory;

#[tokio::test]
async fn test_unlock_awards_bonus_once() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("alice");
    services.scoring.ensure_profile(&user).await.unwrap();

    assert!(services
        .achievements
        .unlock(&user, "pushup_beginner", 10)
        .await
        .unwrap());
    assert!(!services
        .achievements
        .unlock(&user, "pushup_beginner", 14)
        .await
        .unwrap());

    let profile = services
        .scoring
        .store()
        .get_profile("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_points, ACHIEVEMENT_POINTS);

    let rankings = services.leaderboard.top(None).await.unwrap();
    assert_eq!(rankings[0].achievement_count, 1);
    assert_eq!(rankings[0].total_points, ACHIEVEMENT_POINTS);

    let stored = services
        .scoring
        .store()
        .list_achievements("alice")
        .await
        .unwrap();
    let beginner = stored.iter().find(|a| a.id == "pushup_beginner").unwrap();
    assert!(beginner.unlocked);
    assert!(beginner.unlocked_at.is_some());
    assert_eq!(beginner.value, 10);
}

#[tokio::test]
async fn test_unknown_achievement_is_rejected() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("bob");
    services.scoring.ensure_profile(&user).await.unwrap();

    let err = services
        .achievements
        .unlock(&user, "pushup_legend", 1)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_push_up_checks_unlock_every_satisfied_threshold() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("carol");
    services.scoring.ensure_profile(&user).await.unwrap();

    let unlocked = services
        .achievements
        .check_push_ups(&user, 55, 10)
        .await
        .unwrap();
    assert_eq!(
        unlocked,
        vec!["pushup_beginner", "pushup_intermediate", "pushup_streak_10"]
    );

    // Nothing new the second time
    let again = services
        .achievements
        .check_push_ups(&user, 60, 12)
        .await
        .unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_plank_check_uses_hold_seconds() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("dave");
    services.scoring.ensure_profile(&user).await.unwrap();

    assert!(services
        .achievements
        .check_plank(&user, 29)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        services.achievements.check_plank(&user, 61).await.unwrap(),
        vec!["plank_beginner", "plank_intermediate"]
    );
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("erin");
    services.scoring.ensure_profile(&user).await.unwrap();
    services
        .achievements
        .unlock(&user, "plank_beginner", 31)
        .await
        .unwrap();

    assert_eq!(
        services.achievements.initialize("erin").await.unwrap(),
        CATALOG.len() - 1
    );
    assert_eq!(services.achievements.initialize("erin").await.unwrap(), 0);

    let stored = services
        .scoring
        .store()
        .list_achievements("erin")
        .await
        .unwrap();
    assert_eq!(stored.len(), CATALOG.len());
    assert_eq!(stored.iter().filter(|a| a.unlocked).count(), 1);
}

#[tokio::test]
async fn test_list_merges_catalog_with_records() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("frank");
    services.scoring.ensure_profile(&user).await.unwrap();

    // Without records every exercise achievement is reported locked
    let listed = services.achievements.list("frank").await.unwrap();
    let exercise_entries = CATALOG
        .iter()
        .filter(|d| d.category != AchievementCategory::Challenge)
        .count();
    assert_eq!(listed.len(), exercise_entries);
    assert!(listed.iter().all(|a| !a.unlocked));
    assert_eq!(listed[0].id, CATALOG[0].id);

    services
        .achievements
        .unlock(&user, "plank_master", 125)
        .await
        .unwrap();
    services.achievements.initialize("frank").await.unwrap();

    let listed = services.achievements.list("frank").await.unwrap();
    assert_eq!(listed.len(), CATALOG.len());
    assert!(listed
        .iter()
        .find(|a| a.id == "plank_master")
        .is_some_and(|a| a.unlocked));
    let tail: Vec<&str> = listed[exercise_entries..]
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(tail, vec!["challenge_master", "challenge_streak_3"]);
}

#[tokio::test]
async fn test_recount_overwrites_leaderboard_count() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("gina");
    services.scoring.ensure_profile(&user).await.unwrap();
    services
        .achievements
        .check_push_ups(&user, 10, 10)
        .await
        .unwrap();

    assert_eq!(services.achievements.recount("gina").await.unwrap(), 2);
    let rankings = services.leaderboard.top(None).await.unwrap();
    assert_eq!(rankings[0].achievement_count, 2);
}
