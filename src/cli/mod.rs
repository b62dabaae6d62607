//! Command-line interface for issuetrack.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// issuetrack - support issue tracking API
#[derive(Debug, Parser)]
#[command(name = "issuetrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Insert the default user, officer and statuses if missing
    Seed,

    /// Write a default config.toml to the current directory
    Init,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    /// Explicit `--config` file or the usual search path, then environment
    /// overrides.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => {
                let mut config = Config::load_from_path(path)?;
                config.apply_env_overrides(|key| std::env::var(key).ok());
                Ok(config)
            }
            None => Config::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["issuetrack"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_subcommand_and_config() {
        let cli = Cli::parse_from(["issuetrack", "seed", "--config", "/etc/issuetrack.toml"]);
        assert_eq!(cli.command(), Commands::Seed);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/issuetrack.toml")));
    }
}
