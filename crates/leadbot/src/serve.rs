// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadbot serve` command implementation.
//!
//! Wires the CSV lead log, the Telegram channel and the conversation
//! controller into an [`AgentLoop`] and runs it until SIGINT/SIGTERM.

use std::sync::Arc;

use leadbot_agent::shutdown;
use leadbot_agent::{AgentLoop, ConversationController};
use leadbot_config::LeadbotConfig;
use leadbot_core::{ChannelAdapter, HealthStatus, LeadStore, LeadbotError, PluginAdapter};
use leadbot_storage::CsvLeadLog;
use leadbot_telegram::TelegramChannel;
use tracing::{info, warn};

/// Runs the bot until a shutdown signal arrives.
pub async fn run_serve(config: LeadbotConfig) -> Result<(), LeadbotError> {
    init_tracing(&config.bot.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        leads_path = config.storage.leads_path.as_str(),
        "starting leadbot"
    );

    let store = Arc::new(CsvLeadLog::new(&config.storage));
    store.initialize().await?;
    match store.health_check().await? {
        HealthStatus::Healthy => {}
        HealthStatus::Unhealthy(reason) => {
            warn!(reason = reason.as_str(), "lead log health check failed");
        }
    }
    let leads: Arc<dyn LeadStore> = store;

    let token = config
        .telegram
        .bot_token
        .as_deref()
        .ok_or_else(|| LeadbotError::Config("telegram.bot_token is not set".to_string()))?;
    let mut channel = TelegramChannel::new(token)?;
    channel.connect().await?;

    let controller = ConversationController::new(&config, leads.clone())?;
    let mut agent = AgentLoop::new(Box::new(channel), leads, controller);

    let cancel = shutdown::install_signal_handler();
    agent.run(cancel).await?;

    info!("leadbot stopped");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// `leadbot*` targets at the configured level, everything else at `warn`.
fn default_filter(log_level: &str) -> String {
    format!("leadbot={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_uses_configured_level() {
        let filter = default_filter("debug");
        assert_eq!(filter, "leadbot=debug,warn");
        assert!(tracing_subscriber::EnvFilter::try_new(&filter).is_ok());
    }
}
