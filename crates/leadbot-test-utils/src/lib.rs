// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Leadbot integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a Telegram connection.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock messaging channel with message injection and capture
//! - [`MemoryLeadStore`] - In-memory lead store with failure injection
//! - [`TestHarness`] - Controller wired to a mock channel and a temp CSV log

pub mod harness;
pub mod memory_store;
pub mod mock_channel;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_store::MemoryLeadStore;
pub use mock_channel::MockChannel;
