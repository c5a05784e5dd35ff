// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory service wiring, and test identities
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `posefit`
//!
//! Every helper returns the temporary directory holding the pending queue;
//! keep it alive for the duration of the test.

use posefit::config::PosefitConfig;
use posefit::models::UserIdentity;
use posefit::resilience::RetryPolicy;
use posefit::services::Services;
use posefit::storage::{InMemoryStore, PendingOperationQueue, ProgressStore};
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Retry policy without waiting between attempts
pub const fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 0,
        jitter_ms: 0,
    }
}

/// Default configuration with instant retries
pub fn test_config() -> PosefitConfig {
    PosefitConfig {
        retry: fast_retry(),
        ..PosefitConfig::default()
    }
}

/// Pending queue stored in a fresh temporary directory
pub fn test_pending_queue() -> (Arc<PendingOperationQueue>, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let queue = Arc::new(PendingOperationQueue::new(dir.path().join("pending.json")));
    (queue, dir)
}

/// Services over any store
pub fn services_with_store(store: Arc<dyn ProgressStore>) -> (Services, TempDir) {
    init_test_logging();
    let (pending, dir) = test_pending_queue();
    (Services::new(store, pending, &test_config()), dir)
}

/// Services over an in-memory store; the store handle allows failure injection
pub fn create_test_services() -> (Services, InMemoryStore, TempDir) {
    let store = InMemoryStore::new();
    let (services, dir) = services_with_store(Arc::new(store.clone()));
    (services, store, dir)
}

/// Identity whose display name is derived from the id
pub fn test_user(user_id: &str) -> UserIdentity {
    UserIdentity::new(user_id, format!("{user_id} name"))
}
