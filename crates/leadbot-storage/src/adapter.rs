// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV implementation of the LeadStore trait.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use leadbot_config::model::StorageConfig;
use leadbot_core::{AdapterType, HealthStatus, Lead, LeadStore, LeadbotError, PluginAdapter};

use crate::writer;

/// Append-only CSV lead log.
///
/// All file access goes through one async mutex (the single writer) and runs
/// on the blocking thread pool.
pub struct CsvLeadLog {
    path: Arc<PathBuf>,
    lock: Mutex<()>,
}

impl CsvLeadLog {
    /// Creates a log at `config.leads_path`. Nothing is touched on disk until
    /// [`LeadStore::initialize`] or the first append.
    pub fn new(config: &StorageConfig) -> Self {
        Self::from_path(&config.leads_path)
    }

    /// Creates a log at an explicit path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            lock: Mutex::new(()),
        }
    }

    /// Location of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, LeadbotError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, LeadbotError> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || op(path.as_path()))
            .await
            .map_err(|e| LeadbotError::Internal(format!("lead log task failed: {e}")))?
    }
}

#[async_trait]
impl PluginAdapter for CsvLeadLog {
    fn name(&self) -> &str {
        "csv"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LeadbotError> {
        match self.run_blocking(writer::probe_writable).await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "lead log {} is not writable: {e}",
                self.path.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), LeadbotError> {
        // Every append is flushed before it returns; waiting for the lock
        // lets an in-flight append finish.
        let _guard = self.lock.lock().await;
        debug!("lead log closed");
        Ok(())
    }
}

#[async_trait]
impl LeadStore for CsvLeadLog {
    async fn initialize(&self) -> Result<(), LeadbotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(LeadbotError::storage)?;
        }
        info!(path = %self.path.display(), "lead log ready");
        Ok(())
    }

    async fn append(&self, lead: &Lead) -> Result<(), LeadbotError> {
        let lead = lead.clone();
        let user_id = lead.user_id.clone();
        self.run_blocking(move |path| writer::append_lead(path, &lead))
            .await?;
        debug!(user_id = user_id.as_str(), "lead appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Lead>, LeadbotError> {
        self.run_blocking(writer::read_leads).await
    }
}
