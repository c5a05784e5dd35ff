// ABOUTME: Integration tests for the SQLite progress store
// ABOUTME: Exercises every store operation against in-memory and file databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use posefit::config::DatabaseUrl;
use posefit::constants::achievements::{self as catalog, CATALOG};
use posefit::constants::scoring::DEFAULT_ATTRIBUTE_VALUE;
use posefit::errors::ErrorCode;
use posefit::models::{
    Achievement, Attribute, ExerciseDelta, ExerciseType, LeaderboardDelta, SessionRecord,
};
use posefit::services::challenges::build_challenge;
use posefit::storage::{open_store, ProgressStore, SqliteStore};
use std::sync::Arc;
use uuid::Uuid;

async fn memory_store() -> SqliteStore {
    common::init_test_logging();
    SqliteStore::connect("sqlite::memory:").await.unwrap()
}

fn session(exercise: ExerciseType, minutes_ago: i64) -> SessionRecord {
    SessionRecord {
        id: Uuid::new_v4(),
        exercise,
        recorded_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
            - Duration::minutes(minutes_ago),
        count: 10,
        points_earned: 12,
        max_consecutive_reps: 8,
        calories_burned: 4.0,
        duration_secs: 45,
    }
}

#[tokio::test]
async fn test_profile_defaults_and_idempotent_creation() {
    let store = memory_store().await;

    let created = store.ensure_profile("u1", "Ann").await.unwrap();
    assert_eq!(created.user_id, "u1");
    assert_eq!(created.display_name, "Ann");
    assert_eq!(created.total_points, 0);
    assert!((created.attributes.strength - DEFAULT_ATTRIBUTE_VALUE).abs() < f32::EPSILON);
    assert!(created.analytics.last_workout.is_none());

    store.add_total_points("u1", 5).await.unwrap();
    let again = store.ensure_profile("u1", "Other").await.unwrap();
    assert_eq!(again.display_name, "Ann");
    assert_eq!(again.total_points, 5);

    assert!(store.get_profile("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_increments_and_personal_bests() {
    let store = memory_store().await;
    store.ensure_profile("u1", "Ann").await.unwrap();

    store
        .apply_exercise_delta(
            "u1",
            &ExerciseDelta::PushUp {
                reps: 3,
                points: 6,
                calories: 1.2,
            },
        )
        .await
        .unwrap();
    store
        .apply_exercise_delta(
            "u1",
            &ExerciseDelta::Plank {
                points: 2,
                seconds: 4,
            },
        )
        .await
        .unwrap();
    assert_eq!(store.add_total_points("u1", 25).await.unwrap(), 33);

    let strength = store
        .adjust_attribute("u1", Attribute::Strength, 0.5)
        .await
        .unwrap();
    assert!((strength - (DEFAULT_ATTRIBUTE_VALUE + 0.5)).abs() < 1e-4);

    assert_eq!(store.raise_best_streak("u1", 7).await.unwrap(), 7);
    assert_eq!(store.raise_best_streak("u1", 4).await.unwrap(), 7);
    assert_eq!(store.raise_best_plank_duration("u1", 40).await.unwrap(), 40);
    assert_eq!(store.raise_best_plank_duration("u1", 90).await.unwrap(), 90);

    let last = Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap();
    store.set_workout_state("u1", last, 3).await.unwrap();

    let profile = store.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(profile.push_ups.count, 3);
    assert_eq!(profile.push_ups.points, 6);
    assert_eq!(profile.push_ups.best_streak, 7);
    assert_eq!(profile.plank.points, 2);
    assert_eq!(profile.plank.total_seconds, 4);
    assert_eq!(profile.plank.best_duration_secs, 90);
    assert_eq!(profile.total_points, 33);
    assert!((profile.analytics.total_calories_burned - 1.2).abs() < 1e-9);
    assert_eq!(profile.analytics.last_workout, Some(last));
    assert_eq!(profile.analytics.workout_streak, 3);
}

#[tokio::test]
async fn test_writes_to_unknown_profile_are_not_found() {
    let store = memory_store().await;

    let err = store.add_total_points("ghost", 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(!err.is_retryable());

    let err = store
        .apply_exercise_delta(
            "ghost",
            &ExerciseDelta::Plank {
                points: 1,
                seconds: 2,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_session_history_newest_first_with_filter() {
    let store = memory_store().await;
    store.ensure_profile("u1", "Ann").await.unwrap();

    let older = session(ExerciseType::PushUp, 60);
    let newer = session(ExerciseType::PushUp, 5);
    let plank = session(ExerciseType::Plank, 30);
    for record in [&older, &newer, &plank] {
        store.record_session("u1", record).await.unwrap();
    }

    let all = store.list_sessions("u1", None).await.unwrap();
    assert_eq!(all, vec![newer.clone(), plank.clone(), older.clone()]);

    let push_ups = store
        .list_sessions("u1", Some(ExerciseType::PushUp))
        .await
        .unwrap();
    assert_eq!(push_ups, vec![newer, older]);
    assert!(store.list_sessions("u2", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_leaderboard_upsert_and_order() {
    let store = memory_store().await;

    store
        .apply_leaderboard_delta("u1", &LeaderboardDelta::exercise("Ann", ExerciseType::PushUp, 10))
        .await
        .unwrap();
    store
        .apply_leaderboard_delta("u1", &LeaderboardDelta::achievement("Ann", 25))
        .await
        .unwrap();
    store
        .apply_leaderboard_delta("u2", &LeaderboardDelta::exercise("Bob", ExerciseType::Plank, 35))
        .await
        .unwrap();
    store
        .apply_leaderboard_delta("u3", &LeaderboardDelta::exercise("Cat", ExerciseType::Crunch, 35))
        .await
        .unwrap();

    let rankings = store.top_rankings(10).await.unwrap();
    let order: Vec<&str> = rankings.iter().map(|r| r.user_name.as_str()).collect();
    assert_eq!(order, vec!["Ann", "Bob", "Cat"]);
    assert_eq!(rankings[0].total_points, 35);
    assert_eq!(rankings[0].push_up_points, 10);
    assert_eq!(rankings[0].achievement_count, 1);
    assert_eq!(rankings[1].plank_points, 35);
    assert_eq!(rankings[2].crunch_points, 35);

    assert_eq!(store.top_rankings(1).await.unwrap().len(), 1);
    assert_eq!(store.top_rankings(usize::MAX).await.unwrap().len(), 3);

    store.set_achievement_count("u2", 4).await.unwrap();
    let bob = store
        .top_rankings(10)
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.user_id == "u2")
        .unwrap();
    assert_eq!(bob.achievement_count, 4);

    let err = store.set_achievement_count("ghost", 1).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_achievement_records() {
    let store = memory_store().await;
    let now = Utc::now();
    let beginner = catalog::find("pushup_beginner").unwrap();

    let locked: Vec<Achievement> = CATALOG.iter().map(Achievement::locked).collect();
    assert_eq!(
        store.insert_missing_achievements("u1", &locked).await.unwrap(),
        CATALOG.len()
    );
    assert_eq!(
        store.insert_missing_achievements("u1", &locked).await.unwrap(),
        0
    );

    let unlocked = Achievement::unlocked(beginner, 11, now);
    assert!(store.unlock_achievement("u1", &unlocked).await.unwrap());
    assert!(!store.unlock_achievement("u1", &unlocked).await.unwrap());

    // Unlocking without a locked record creates it
    let plank = Achievement::unlocked(catalog::find("plank_beginner").unwrap(), 33, now);
    assert!(store.unlock_achievement("u2", &plank).await.unwrap());

    let records = store.list_achievements("u1").await.unwrap();
    assert_eq!(records.len(), CATALOG.len());
    let stored = records.iter().find(|a| a.id == beginner.id).unwrap();
    assert!(stored.unlocked);
    assert_eq!(stored.value, 11);
    assert_eq!(
        stored.unlocked_at.map(|t| t.timestamp()),
        Some(now.timestamp())
    );
    assert_eq!(records.iter().filter(|a| a.unlocked).count(), 1);
    assert_eq!(store.list_achievements("u2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_challenge_lifecycle() {
    let store = memory_store().await;
    let first = build_challenge(
        ExerciseType::PushUp,
        20,
        Utc.with_ymd_and_hms(2025, 5, 1, 7, 0, 0).unwrap(),
    );
    let second = build_challenge(
        ExerciseType::Plank,
        45,
        Utc.with_ymd_and_hms(2025, 5, 2, 7, 0, 0).unwrap(),
    );
    store.insert_challenge("u1", &second).await.unwrap();
    store.insert_challenge("u1", &first).await.unwrap();

    let listed = store.list_challenges("u1").await.unwrap();
    assert_eq!(listed, vec![first.clone(), second.clone()]);

    store
        .update_challenge_progress("u1", first.id, 40)
        .await
        .unwrap();
    let done_at = Utc.with_ymd_and_hms(2025, 5, 1, 19, 0, 0).unwrap();
    assert!(store.complete_challenge("u1", first.id, done_at).await.unwrap());
    assert!(!store.complete_challenge("u1", first.id, done_at).await.unwrap());

    let stored = store
        .list_challenges("u1")
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.id == first.id)
        .unwrap();
    assert!(stored.completed);
    assert_eq!(stored.progress, 100);
    assert_eq!(stored.completed_at, Some(done_at));

    let missing = Uuid::new_v4();
    let err = store
        .update_challenge_progress("u1", missing, 10)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    let err = store
        .complete_challenge("u1", missing, done_at)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("posefit.db"),
    };

    {
        let store: Arc<dyn ProgressStore> = open_store(&url).await.unwrap();
        store.ensure_profile("u1", "Ann").await.unwrap();
        store.add_total_points("u1", 12).await.unwrap();
    }

    let reopened = open_store(&url).await.unwrap();
    let profile = reopened.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(profile.total_points, 12);
}

#[tokio::test]
async fn test_services_run_over_sqlite() {
    let store: Arc<dyn ProgressStore> = Arc::new(memory_store().await);
    let (services, _dir) = common::services_with_store(store);
    let user = common::test_user("u1");
    services.scoring.ensure_profile(&user).await.unwrap();

    services
        .scoring
        .award_push_ups(&user, 2, 2, 2, 0.8)
        .await
        .unwrap();
    assert!(services
        .achievements
        .unlock(&user, "pushup_beginner", 10)
        .await
        .unwrap());
    assert_eq!(services.achievements.recount("u1").await.unwrap(), 1);

    let ranking = services.leaderboard.top(None).await.unwrap().remove(0);
    assert_eq!(ranking.push_up_points, 2);
    assert_eq!(ranking.total_points, 27);
    assert_eq!(ranking.achievement_count, 1);
}
