// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `LeadStore` for controller tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use leadbot_core::types::{AdapterType, HealthStatus, Lead};
use leadbot_core::{LeadStore, LeadbotError, PluginAdapter};

/// Keeps leads in a vector. `set_failing(true)` makes appends fail.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    failing: AtomicBool,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PluginAdapter for MemoryLeadStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadbotError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("failure injected".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LeadbotError> {
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn initialize(&self) -> Result<(), LeadbotError> {
        Ok(())
    }

    async fn append(&self, lead: &Lead) -> Result<(), LeadbotError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LeadbotError::storage(std::io::Error::other(
                "injected append failure",
            )));
        }
        self.leads.lock().await.push(lead.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Lead>, LeadbotError> {
        Ok(self.leads.lock().await.clone())
    }
}
