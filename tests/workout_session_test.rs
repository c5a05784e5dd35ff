// ABOUTME: End-to-end tests feeding pose frames through a workout session
// ABOUTME: Verifies push-up and plank scoring, challenge completion, achievements, and offline sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use posefit::constants::scoring::{ACHIEVEMENT_POINTS, DEFAULT_ATTRIBUTE_VALUE};
use posefit::detection::{fixtures, TrackerEvent};
use posefit::errors::ErrorCode;
use posefit::models::{
    Attribute, ExerciseType, PendingOperation, PendingUpdate, PoseFrame,
};
use posefit::services::challenges::{build_challenge, reward_for};
use posefit::services::Services;
use posefit::session::{FrameOutcome, WorkoutSession};
use posefit::storage::InMemoryStore;
use std::sync::Arc;

async fn feed(session: &WorkoutSession, frames: &[PoseFrame]) -> Vec<TrackerEvent> {
    let mut events = Vec::new();
    for frame in frames {
        match session.process_frame(frame).await.unwrap() {
            FrameOutcome::Processed(emitted) => events.extend(emitted),
            FrameOutcome::Skipped => panic!("sequential frames must not be skipped"),
        }
    }
    events
}

#[tokio::test]
async fn test_start_prepares_profile_achievements_and_challenge() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("alice");

    let session = WorkoutSession::start(user, ExerciseType::PushUp, services.clone())
        .await
        .unwrap();
    assert_eq!(session.exercise(), ExerciseType::PushUp);
    assert_eq!(session.user().user_id, "alice");

    let store = services.scoring.store();
    assert!(store.get_profile("alice").await.unwrap().is_some());
    assert_eq!(store.list_achievements("alice").await.unwrap().len(), 9);
    assert!(services.challenges.current("alice").await.unwrap().is_some());
}

#[tokio::test]
async fn test_crunch_has_no_tracker() {
    let (services, _store, _dir) = common::create_test_services();
    let err = WorkoutSession::new(common::test_user("bob"), ExerciseType::Crunch, services)
        .err()
        .unwrap();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_push_up_session_scores_and_saves() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("carol");
    services.scoring.ensure_profile(&user).await.unwrap();
    // An open plank challenge keeps push-ups from completing a random one
    services
        .challenges
        .insert("carol", build_challenge(ExerciseType::Plank, 120, Utc::now()))
        .await
        .unwrap();

    let session = WorkoutSession::start(user, ExerciseType::PushUp, services.clone())
        .await
        .unwrap();

    // Reps complete every 1200 ms starting at 800 ms; awards at rep 1 and rep 6
    let frames = fixtures::push_up_reps(6, 0, 400);
    let events = feed(&session, &frames).await;
    let awards: Vec<(i64, u32)> = events
        .iter()
        .filter_map(|event| match event {
            TrackerEvent::PointsAwarded { points, reps, .. } => Some((*points, *reps)),
            _ => None,
        })
        .collect();
    assert_eq!(awards, vec![(1, 1), (6, 5)]);

    let end_ms = frames.last().unwrap().timestamp_ms;
    let record = session.finish(end_ms).await.unwrap().unwrap();
    assert_eq!(record.exercise, ExerciseType::PushUp);
    assert_eq!(record.count, 6);
    assert_eq!(record.points_earned, 7);
    assert_eq!(record.max_consecutive_reps, 6);
    assert_eq!(record.duration_secs, 6);

    let store = services.scoring.store();
    let profile = store.get_profile("carol").await.unwrap().unwrap();
    assert_eq!(profile.push_ups.count, 6);
    assert_eq!(profile.push_ups.points, 7);
    assert_eq!(profile.push_ups.best_streak, 6);
    assert_eq!(profile.total_points, 7);
    assert_eq!(profile.analytics.workout_streak, 1);
    assert!((profile.attributes.get(Attribute::Strength) - (DEFAULT_ATTRIBUTE_VALUE + 1.0)).abs() < 1e-4);

    let rankings = services.leaderboard.top(None).await.unwrap();
    assert_eq!(rankings[0].push_up_points, 7);
    assert_eq!(
        store.list_sessions("carol", None).await.unwrap(),
        vec![record]
    );
}

async fn unlocked_ids(services: &Services, user_id: &str) -> Vec<String> {
    services
        .achievements
        .list(user_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.unlocked)
        .map(|a| a.id)
        .collect()
}

#[tokio::test]
async fn test_rep_achievements_count_reps_held_back_by_award_throttle() {
    let (services, _store, _dir) = common::create_test_services();
    let session = WorkoutSession::start(
        common::test_user("hana"),
        ExerciseType::PushUp,
        services.clone(),
    )
    .await
    .unwrap();

    // Ten reps inside 3 s: only the first one is awarded before the session ends
    let frames = fixtures::push_up_reps(10, 0, 100);
    feed(&session, &frames).await;

    let store = services.scoring.store();
    let profile = store.get_profile("hana").await.unwrap().unwrap();
    assert_eq!(profile.push_ups.count, 1);
    let unlocked = unlocked_ids(&services, "hana").await;
    assert!(unlocked.iter().any(|id| id == "pushup_beginner"));
    assert!(unlocked.iter().any(|id| id == "pushup_streak_10"));

    session.finish(10_000).await.unwrap().unwrap();
    let profile = store.get_profile("hana").await.unwrap().unwrap();
    assert_eq!(profile.push_ups.count, 10);
    let unlocked = unlocked_ids(&services, "hana").await;
    assert!(unlocked.iter().any(|id| id == "pushup_beginner"));
    assert!(!unlocked.iter().any(|id| id == "pushup_intermediate"));
}

#[tokio::test]
async fn test_rep_achievements_include_earlier_sessions() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("ivan");
    services.scoring.ensure_profile(&user).await.unwrap();
    // Earlier sessions left the lifetime total one short of the threshold
    services
        .scoring
        .award_push_ups(&user, 9, 9, 9, 3.6)
        .await
        .unwrap();

    let session = WorkoutSession::start(user, ExerciseType::PushUp, services.clone())
        .await
        .unwrap();
    feed(&session, &fixtures::push_up_reps(1, 0, 100)).await;
    session.finish(1_000).await.unwrap().unwrap();

    let profile = services
        .scoring
        .store()
        .get_profile("ivan")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.push_ups.count, 10);
    assert!(unlocked_ids(&services, "ivan")
        .await
        .iter()
        .any(|id| id == "pushup_beginner"));
}

#[tokio::test]
async fn test_plank_session_completes_challenge_and_unlocks_achievement() {
    let (services, _store, _dir) = common::create_test_services();
    let user = common::test_user("dave");
    services.scoring.ensure_profile(&user).await.unwrap();
    let challenge = services
        .challenges
        .insert("dave", build_challenge(ExerciseType::Plank, 30, Utc::now()))
        .await
        .unwrap();

    let session = WorkoutSession::start(user, ExerciseType::Plank, services.clone())
        .await
        .unwrap();
    let frames = fixtures::plank_hold(0, 31, 500);
    let events = feed(&session, &frames).await;

    assert!(events.contains(&TrackerEvent::MilestoneReached { seconds: 30 }));
    assert!(events
        .iter()
        .any(|event| matches!(event, TrackerEvent::SessionCompleted(s) if s.duration_secs == 31)));

    // The hold already ended and was saved when the standing frame arrived
    let end_ms = frames.last().unwrap().timestamp_ms;
    assert!(session.finish(end_ms).await.unwrap().is_none());

    let store = services.scoring.store();
    let profile = store.get_profile("dave").await.unwrap().unwrap();
    assert_eq!(profile.plank.points, 15);
    assert_eq!(profile.plank.total_seconds, 30);
    assert_eq!(profile.plank.best_duration_secs, 31);
    let challenge_reward = reward_for(ExerciseType::Plank, 30);
    assert_eq!(profile.total_points, 15 + challenge_reward + ACHIEVEMENT_POINTS);
    assert!((profile.attributes.stamina - (DEFAULT_ATTRIBUTE_VALUE + 3.0)).abs() < 1e-3);

    let completed = store
        .list_challenges("dave")
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.id == challenge.id)
        .unwrap();
    assert!(completed.completed);

    let achievements = services.achievements.list("dave").await.unwrap();
    let unlocked: Vec<&str> = achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(unlocked, vec!["plank_beginner"]);

    let history = store
        .list_sessions("dave", Some(ExerciseType::Plank))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].duration_secs, 31);
    assert_eq!(history[0].points_earned, 15);
}

#[tokio::test]
async fn test_short_plank_is_not_saved() {
    let (services, _store, _dir) = common::create_test_services();
    let session = WorkoutSession::start(
        common::test_user("erin"),
        ExerciseType::Plank,
        services.clone(),
    )
    .await
    .unwrap();

    feed(&session, &fixtures::plank_hold(0, 2, 500)).await;
    assert!(session.finish(3_000).await.unwrap().is_none());
    assert!(services
        .scoring
        .store()
        .list_sessions("erin", None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_reset_saves_open_plank() {
    let (services, _store, _dir) = common::create_test_services();
    let session = WorkoutSession::start(
        common::test_user("frank"),
        ExerciseType::Plank,
        services.clone(),
    )
    .await
    .unwrap();

    let mut frames = fixtures::plank_hold(0, 10, 1_000);
    // Drop the standing frame so the hold is still open
    frames.pop();
    feed(&session, &frames).await;

    let record = session.reset(10_000).await.unwrap().unwrap();
    assert_eq!(record.exercise, ExerciseType::Plank);
    assert_eq!(record.duration_secs, 10);
    assert!(session.reset(11_000).await.unwrap().is_none());
}

#[tokio::test]
async fn test_start_replays_queued_updates() {
    common::init_test_logging();
    let store = InMemoryStore::new();
    let (pending, _dir) = common::test_pending_queue();
    let services = Services::new(Arc::new(store), pending.clone(), &common::test_config());
    let user = common::test_user("gina");
    services.scoring.ensure_profile(&user).await.unwrap();

    pending
        .push(PendingOperation {
            user_id: "gina".to_owned(),
            recorded_at: Utc::now(),
            update: PendingUpdate::AdjustAttribute {
                attribute: Attribute::Agility,
                value: 2.0,
            },
        })
        .await
        .unwrap();

    WorkoutSession::start(user, ExerciseType::PushUp, services.clone())
        .await
        .unwrap();

    assert_eq!(pending.len().await.unwrap(), 0);
    let profile = services
        .scoring
        .store()
        .get_profile("gina")
        .await
        .unwrap()
        .unwrap();
    assert!((profile.attributes.agility - (DEFAULT_ATTRIBUTE_VALUE + 2.0)).abs() < 1e-4);
}
