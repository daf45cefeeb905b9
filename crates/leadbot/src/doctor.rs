// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `leadbot check` command implementation.
//!
//! Runs diagnostic checks against the Leadbot environment to identify
//! configuration issues, an unwritable lead log, or an invalid bot token.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use leadbot_config::LeadbotConfig;
use leadbot_core::{HealthStatus, LeadStore, PluginAdapter};
use leadbot_storage::CsvLeadLog;
use leadbot_telegram::TelegramChannel;

/// Upper bound for the Telegram `getMe` round trip.
const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `leadbot check` command.
///
/// Returns `true` when no check failed. With `plain`, disables colored output.
pub async fn run_doctor(config_path: Option<&Path>, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    let (config_result, config) = check_config(config_path);
    results.push(config_result);

    // Fall back to an unvalidated load so the lead log can still be checked.
    let config = config.or_else(|| crate::load(config_path, false).ok());

    match &config {
        Some(config) => {
            results.push(check_lead_log(config).await);
            results.push(check_telegram(config).await);
        }
        None => {
            let start = Instant::now();
            results.push(CheckResult::new(
                "Lead log",
                CheckStatus::Warn,
                "skipped: configuration did not load",
                start,
            ));
        }
    }

    let fail_count = print_results(&results, use_color);
    fail_count == 0
}

/// Prints the results table and returns the number of failed checks.
fn print_results(results: &[CheckResult], use_color: bool) -> usize {
    println!();
    println!("  leadbot check");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in results {
        match result.status {
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", format_line(result, use_color));
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    fail_count
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();

    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Check configuration loads and validates without errors.
fn check_config(path: Option<&Path>) -> (CheckResult, Option<LeadbotConfig>) {
    let start = Instant::now();
    match crate::load(path, true) {
        Ok(config) => (
            CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
            Some(config),
        ),
        Err(errors) => {
            let summary = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            (
                CheckResult::new(
                    "Configuration",
                    CheckStatus::Fail,
                    format!("{} error(s): {summary}", errors.len()),
                    start,
                ),
                None,
            )
        }
    }
}

/// Check the lead log exists (or can be created) and parses.
async fn check_lead_log(config: &LeadbotConfig) -> CheckResult {
    let start = Instant::now();
    let log = CsvLeadLog::new(&config.storage);
    let path = log.path().display().to_string();

    match log.health_check().await {
        Ok(HealthStatus::Healthy) => {}
        Ok(HealthStatus::Unhealthy(reason)) => {
            return CheckResult::new("Lead log", CheckStatus::Fail, reason, start);
        }
        Err(e) => {
            return CheckResult::new("Lead log", CheckStatus::Fail, e.to_string(), start);
        }
    }

    if !log.path().exists() {
        return CheckResult::new(
            "Lead log",
            CheckStatus::Warn,
            format!("not found: {path} (will be created on first lead)"),
            start,
        );
    }

    match log.count().await {
        Ok(count) => CheckResult::new(
            "Lead log",
            CheckStatus::Pass,
            format!("{path}, {count} lead(s)"),
            start,
        ),
        Err(e) => CheckResult::new(
            "Lead log",
            CheckStatus::Fail,
            format!("{path} is unreadable: {e}"),
            start,
        ),
    }
}

/// Check the bot token against Telegram `getMe`.
async fn check_telegram(config: &LeadbotConfig) -> CheckResult {
    let start = Instant::now();

    let Some(token) = config
        .telegram
        .bot_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    else {
        return CheckResult::new("Telegram", CheckStatus::Warn, "no bot token configured", start);
    };

    let channel = match TelegramChannel::new(token) {
        Ok(channel) => channel,
        Err(e) => return CheckResult::new("Telegram", CheckStatus::Fail, e.to_string(), start),
    };

    match tokio::time::timeout(TELEGRAM_TIMEOUT, channel.health_check()).await {
        Ok(Ok(HealthStatus::Healthy)) => {
            CheckResult::new("Telegram", CheckStatus::Pass, "getMe ok", start)
        }
        Ok(Ok(HealthStatus::Unhealthy(reason))) => {
            CheckResult::new("Telegram", CheckStatus::Fail, reason, start)
        }
        Ok(Err(e)) => CheckResult::new("Telegram", CheckStatus::Fail, e.to_string(), start),
        Err(_) => CheckResult::new(
            "Telegram",
            CheckStatus::Fail,
            format!("timeout ({}s)", TELEGRAM_TIMEOUT.as_secs()),
            start,
        ),
    }
}
