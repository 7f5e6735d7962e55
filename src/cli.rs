//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: interactive filter panel over the catalog (default)
//! - **replay**: drive the filter panel from a TOML script with a virtual clock
//! - **parse**: show how a query string is read and written back
//! - **products**: list the products a query string selects
//! - **config**: show, locate or create the configuration file
//!
//! # Examples
//!
//! ```
//! use catalog_filters::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["catalog-filters", "-vv", "parse", "?search=pump"]);
//! assert_eq!(cli.verbose, 2);
//! assert!(matches!(cli.get_command(), Commands::Parse { .. }));
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "catalog-filters")]
#[command(about = "URL-synchronized catalog filters", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive filter panel (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Starting query string, e.g. "search=pump&brandId=b1"
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Debounce window in milliseconds (overrides config)
        #[arg(long = "debounce-ms", value_name = "MS")]
        debounce_ms: Option<u64>,
    },

    /// Replay a scripted filter session
    #[command(visible_alias = "r")]
    Replay {
        /// TOML script to run
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a query string and print its canonical form
    Parse {
        /// Query string, with or without the leading '?'
        #[arg(value_name = "QUERY")]
        query: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the products selected by a query string
    #[command(visible_alias = "ls")]
    Products {
        /// Query string, with or without the leading '?'
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file location
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: None,
            debounce_ms: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["catalog-filters"]);
        assert_eq!(
            cli.get_command(),
            Commands::Browse {
                query: None,
                debounce_ms: None
            }
        );
    }

    #[test]
    fn test_browse_with_query_and_debounce() {
        let cli = Cli::parse_from(["catalog-filters", "b", "search=pump", "--debounce-ms", "200"]);
        assert_eq!(
            cli.get_command(),
            Commands::Browse {
                query: Some("search=pump".to_string()),
                debounce_ms: Some(200)
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "catalog-filters",
            "replay",
            "session.toml",
            "--json",
            "-vvv",
            "--log-file",
            "out.log",
        ]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(
            cli.get_command(),
            Commands::Replay {
                script: PathBuf::from("session.toml"),
                json: true
            }
        );
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["catalog-filters", "--config", "/tmp/c.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Init { force: true }
            }
        );
    }

    #[test]
    fn test_parse_requires_query() {
        assert!(Cli::try_parse_from(["catalog-filters", "parse"]).is_err());
    }
}
