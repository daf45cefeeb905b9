// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Leadbot.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides (including the bare
//! `TELEGRAM_TOKEN` / `ADMIN_CHAT_ID` pair), and miette diagnostic rendering with
//! typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use leadbot_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("leads go to {}", config.storage.leads_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::LeadbotConfig;

/// Load configuration from the XDG hierarchy and environment, then validate it.
///
/// Returns either a valid `LeadbotConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<LeadbotConfig, Vec<ConfigError>> {
    let config = load_unvalidated(None)?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from an explicit file (plus environment) and validate it.
pub fn load_and_validate_path(
    path: &std::path::Path,
) -> Result<LeadbotConfig, Vec<ConfigError>> {
    let config = load_unvalidated(Some(path))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration without the post-deserialization checks.
///
/// Parse and type errors are still reported. Used by commands that only read
/// the lead log and do not need Telegram credentials.
pub fn load_unvalidated(
    path: Option<&std::path::Path>,
) -> Result<LeadbotConfig, Vec<ConfigError>> {
    let result = match path {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };

    result.map_err(|err| {
        let sources = match path {
            Some(path) => std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default(),
            None => collect_toml_sources(),
        };
        diagnostic::figment_to_config_errors(err, &sources)
    })
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<LeadbotConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string(loader::LOCAL_CONFIG_PATH) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_PATH).display().to_string())
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    let system_path = std::path::Path::new(loader::SYSTEM_CONFIG_PATH);
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
