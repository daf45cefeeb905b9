// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leadbot - a Telegram FAQ and lead-intake bot.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod leads;
mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use leadbot_config::{ConfigError, LeadbotConfig};

/// Leadbot - a Telegram FAQ and lead-intake bot.
#[derive(Parser, Debug)]
#[command(name = "leadbot", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bot (default).
    Serve,
    /// Run diagnostic checks against the environment.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the most recent leads from the lead log.
    Leads {
        /// Number of leads to show.
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_or_exit(config_path, true);
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("leadbot: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check { plain } => {
            let healthy = doctor::run_doctor(config_path, plain).await;
            if !healthy {
                std::process::exit(1);
            }
        }
        Commands::Leads { limit } => {
            let config = load_or_exit(config_path, false);
            if let Err(e) = leads::run_leads(&config, limit).await {
                eprintln!("leadbot: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Loads configuration, printing diagnostics and exiting with status 1 on failure.
fn load_or_exit(path: Option<&Path>, validate: bool) -> LeadbotConfig {
    match load(path, validate) {
        Ok(config) => config,
        Err(errors) => {
            leadbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn load(path: Option<&Path>, validate: bool) -> Result<LeadbotConfig, Vec<ConfigError>> {
    match (path, validate) {
        (Some(path), true) => leadbot_config::load_and_validate_path(path),
        (None, true) => leadbot_config::load_and_validate(),
        (path, false) => leadbot_config::load_unvalidated(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::parse_from(["leadbot"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_leads_limit_and_config() {
        let cli = Cli::parse_from(["leadbot", "leads", "--limit", "3", "--config", "bot.toml"]);
        match cli.command {
            Some(Commands::Leads { limit }) => assert_eq!(limit, 3),
            other => panic!("expected leads command, got {other:?}"),
        }
        assert_eq!(cli.config.as_deref(), Some(Path::new("bot.toml")));
    }

    #[test]
    fn cli_parses_check_plain() {
        let cli = Cli::parse_from(["leadbot", "check", "--plain"]);
        assert!(matches!(cli.command, Some(Commands::Check { plain: true })));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn unvalidated_load_of_explicit_file_skips_secret_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leadbot.toml");
        std::fs::write(&path, "[storage]\nleads_path = \"data/leads.csv\"\n").unwrap();

        let config = load(Some(&path), false).unwrap();
        assert_eq!(config.storage.leads_path, "data/leads.csv");
    }
}
