// ABOUTME: Local JSON file queue for progress writes that could not reach the store
// ABOUTME: Operations are appended on failure and drained per user when a sync succeeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use posefit_core::errors::AppResult;
use posefit_core::models::PendingOperation;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Durable queue of [`PendingOperation`]s
///
/// The whole queue is rewritten on each change. The mutex serializes
/// read-modify-write cycles within the process.
#[derive(Debug)]
pub struct PendingOperationQueue {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PendingOperationQueue {
    /// Queue stored at `path`; the file is created on first push
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an operation
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written
    pub async fn push(&self, operation: PendingOperation) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut operations = self.read_all().await?;
        operations.push(operation);
        self.write_all(&operations).await?;
        debug!(queued = operations.len(), path = %self.path.display(), "Queued pending operation");
        Ok(())
    }

    /// Remove and return every operation owned by `user_id`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written
    pub async fn take_for_user(&self, user_id: &str) -> AppResult<Vec<PendingOperation>> {
        let _guard = self.lock.lock().await;
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .read_all()
            .await?
            .into_iter()
            .partition(|op| op.user_id == user_id);
        if !taken.is_empty() {
            self.write_all(&kept).await?;
        }
        Ok(taken)
    }

    /// Put operations back at the front of the queue after a failed replay
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written
    pub async fn restore(&self, mut operations: Vec<PendingOperation>) -> AppResult<()> {
        if operations.is_empty() {
            return Ok(());
        }
        let _guard = self.lock.lock().await;
        operations.extend(self.read_all().await?);
        self.write_all(&operations).await
    }

    /// Every queued operation
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read
    pub async fn list(&self) -> AppResult<Vec<PendingOperation>> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// Number of queued operations
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read
    pub async fn len(&self) -> AppResult<usize> {
        Ok(self.list().await?.len())
    }

    async fn read_all(&self) -> AppResult<Vec<PendingOperation>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, operations: &[PendingOperation]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(operations)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use posefit_core::models::{Attribute, PendingUpdate};

    fn strength(user_id: &str, value: f32) -> PendingOperation {
        PendingOperation {
            user_id: user_id.to_owned(),
            recorded_at: Utc::now(),
            update: PendingUpdate::AdjustAttribute {
                attribute: Attribute::Strength,
                value,
            },
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_queue() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingOperationQueue::new(dir.path().join("nested").join("pending.json"));
        assert_eq!(queue.len().await.unwrap(), 0);
        assert!(queue.take_for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_take_only_drains_matching_user() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingOperationQueue::new(dir.path().join("pending.json"));
        queue.push(strength("u1", 0.5)).await.unwrap();
        queue.push(strength("u2", 1.0)).await.unwrap();
        queue.push(strength("u1", 1.5)).await.unwrap();

        let taken = queue.take_for_user("u1").await.unwrap();
        assert_eq!(taken.len(), 2);
        assert_eq!(queue.len().await.unwrap(), 1);

        queue.restore(taken).await.unwrap();
        let all = queue.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_queue_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending.json");
        PendingOperationQueue::new(&path)
            .push(strength("u1", 0.5))
            .await
            .unwrap();

        let reopened = PendingOperationQueue::new(&path).list().await.unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened[0].user_id, "u1");
        assert_eq!(
            reopened[0].update,
            PendingUpdate::AdjustAttribute {
                attribute: Attribute::Strength,
                value: 0.5,
            }
        );
    }
}
