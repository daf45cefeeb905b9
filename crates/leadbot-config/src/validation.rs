// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes:
//! required secrets, non-blank labels, and a well-formed FAQ table.

use std::collections::HashSet;

use leadbot_core::text::is_normalized;

use crate::diagnostic::ConfigError;
use crate::loader::{ADMIN_CHAT_ID_ENV, TOKEN_ENV};
use crate::model::LeadbotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LeadbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Required secrets
    let token_missing = config
        .telegram
        .bot_token
        .as_deref()
        .is_none_or(|t| t.trim().is_empty());
    if token_missing {
        errors.push(ConfigError::MissingKey {
            key: "telegram.bot_token".to_string(),
            env_var: Some(TOKEN_ENV.to_string()),
        });
    }

    if config.telegram.admin_chat_id.is_none() {
        errors.push(ConfigError::MissingKey {
            key: "telegram.admin_chat_id".to_string(),
            env_var: Some(ADMIN_CHAT_ID_ENV.to_string()),
        });
    }

    if !LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level `{}` is not one of: {}",
                config.bot.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.leads_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.leads_path must not be empty".to_string(),
        });
    }

    // Menu labels must be usable as exact-match buttons.
    let labels = [
        ("menu.faq", &config.menu.faq),
        ("menu.lead", &config.menu.lead),
        ("menu.human", &config.menu.human),
        ("menu.back", &config.menu.back),
    ];
    let mut seen_labels = HashSet::new();
    for (key, label) in labels {
        if label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        } else if label.trim() != label.as_str() {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{label}` must not have leading or trailing whitespace"),
            });
        } else if !seen_labels.insert(label.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{label}` duplicates another menu label"),
            });
        }
    }

    for (key, text) in config.messages.entries() {
        if text.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("messages.{key} must not be empty"),
            });
        }
    }

    // FAQ keywords are matched against normalized input, so they must be normalized too.
    let mut seen_keywords = HashSet::new();
    for (i, entry) in config.faq.iter().enumerate() {
        if entry.keyword.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("faq[{i}].keyword must not be empty"),
            });
            continue;
        }
        if !is_normalized(&entry.keyword) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "faq[{i}].keyword `{}` must be lower-case with single spaces",
                    entry.keyword
                ),
            });
        }
        if !seen_keywords.insert(entry.keyword.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate faq keyword `{}`", entry.keyword),
            });
        }
        if entry.answer.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("faq[{i}].answer must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
