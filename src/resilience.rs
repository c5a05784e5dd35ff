// ABOUTME: Retry policy with exponential backoff and random jitter for progress writes
// ABOUTME: Retries only errors whose code is marked retryable; other failures return immediately
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use posefit_core::constants::retry;
use posefit_core::errors::AppResult;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

/// How often and how patiently a failed write is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry, doubled for each further retry
    pub base_delay_ms: u64,
    /// Exclusive upper bound of the random delay added to each backoff
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry::MAX_ATTEMPTS,
            base_delay_ms: retry::BASE_DELAY_MS,
            jitter_ms: retry::JITTER_MS,
        }
    }
}

impl RetryPolicy {
    /// Backoff without the jitter: `base_delay_ms * 2^attempt`
    #[must_use]
    pub fn base_backoff_ms(&self, attempt: u32) -> u64 {
        self.base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
    }

    /// Delay to wait after failed attempt number `attempt` (zero based)
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.jitter_ms)
        };
        Duration::from_millis(self.base_backoff_ms(attempt).saturating_add(jitter))
    }
}

/// Run `f` until it succeeds, fails with a non-retryable error, or the policy
/// runs out of attempts
///
/// # Errors
///
/// Returns the last error produced by `f`
pub async fn retry_with_backoff<F, Fut, T>(
    operation: &str,
    policy: &RetryPolicy,
    mut f: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if !e.is_retryable() {
                    error!(operation, attempts = attempt, error = %e, "Write failed with non-retryable error");
                    return Err(e);
                }
                if attempt >= max_attempts {
                    error!(operation, attempts = attempt, max_attempts, error = %e, "Write failed after max retries");
                    return Err(e);
                }

                let delay = policy.delay_for(attempt - 1);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    backoff_ms = delay.as_millis() as u64,
                    error = %e,
                    "Write failed, retrying after backoff"
                );
                sleep(delay).await;
            }
        }
    }
}
