// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./leadbot.toml` > `~/.config/leadbot/leadbot.toml` > `/etc/leadbot/leadbot.toml`
//! with environment variable overrides via the `LEADBOT_` prefix and the bare
//! `TELEGRAM_TOKEN` / `ADMIN_CHAT_ID` variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::LeadbotConfig;

/// Bare environment variables accepted alongside the `LEADBOT_` prefix.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const ADMIN_CHAT_ID_ENV: &str = "ADMIN_CHAT_ID";

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/leadbot/leadbot.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "leadbot.toml";

/// Top-level sections addressable through `LEADBOT_<SECTION>_<KEY>`.
const ENV_SECTIONS: &[&str] = &["bot", "telegram", "storage", "menu", "messages"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/leadbot/leadbot.toml` (system-wide)
/// 3. `~/.config/leadbot/leadbot.toml` (user XDG config)
/// 4. `./leadbot.toml` (local directory)
/// 5. `LEADBOT_*` environment variables
/// 6. `TELEGRAM_TOKEN` and `ADMIN_CHAT_ID`
///
/// A `.env` file in the working directory is loaded first; it never replaces
/// variables that are already set.
pub fn load_config() -> Result<LeadbotConfig, figment::Error> {
    load_dotenv();
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no environment).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LeadbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LeadbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LeadbotConfig, figment::Error> {
    load_dotenv();
    Figment::new()
        .merge(Serialized::defaults(LeadbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(bare_env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LeadbotConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
        .merge(bare_env_provider())
}

/// `~/.config/leadbot/leadbot.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadbot").join("leadbot.toml"))
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => debug!(error = %e, "ignoring unreadable .env file"),
    }
}

/// Create the `LEADBOT_` environment provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LEADBOT_TELEGRAM_ADMIN_CHAT_ID` must map to
/// `telegram.admin_chat_id`, not `telegram.admin.chat.id`.
fn env_provider() -> Env {
    Env::prefixed("LEADBOT_").map(|key| {
        // `key` has the prefix stripped: LEADBOT_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str().to_ascii_lowercase();
        for section in ENV_SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}

/// Maps the bare `TELEGRAM_TOKEN` and `ADMIN_CHAT_ID` variables into the telegram section.
fn bare_env_provider() -> Env {
    Env::raw()
        .only(&[TOKEN_ENV, ADMIN_CHAT_ID_ENV])
        .map(|key| {
            if key.as_str().eq_ignore_ascii_case(TOKEN_ENV) {
                "telegram.bot_token".into()
            } else {
                "telegram.admin_chat_id".into()
            }
        })
}
