// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for posefit-cli
// ABOUTME: Provides access to replay, progress, and challenge commands

pub mod challenge;
pub mod progress;
pub mod replay;
