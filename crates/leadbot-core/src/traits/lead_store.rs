// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable, append-only lead log.

use async_trait::async_trait;

use crate::error::LeadbotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Lead;

/// Append-only persistence for completed leads.
///
/// Records are never updated or deleted. Each `append` writes exactly one
/// record, wholly or not at all.
#[async_trait]
pub trait LeadStore: PluginAdapter {
    /// Prepares the backing store (directories, handles).
    async fn initialize(&self) -> Result<(), LeadbotError>;

    /// Appends one lead.
    async fn append(&self, lead: &Lead) -> Result<(), LeadbotError>;

    /// Returns all stored leads in insertion order.
    async fn list(&self) -> Result<Vec<Lead>, LeadbotError>;

    /// Returns the number of stored leads.
    async fn count(&self) -> Result<usize, LeadbotError> {
        Ok(self.list().await?.len())
    }
}
