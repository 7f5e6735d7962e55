//! catalog-filters CLI entry point
//!
//! # Usage
//!
//! ```bash
//! # Open the interactive filter panel (default command)
//! catalog-filters
//! catalog-filters browse "search=pump&sort=price_asc"
//!
//! # Run a scripted session with a virtual clock
//! catalog-filters replay session.toml --json
//!
//! # Inspect a query string
//! catalog-filters parse "?brandId=b2,b1,b2&page=0"
//!
//! # List the products a query selects
//! catalog-filters -q products "categoryId=c1&maxPrice=100"
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/catalog-filters/config.toml` on Linux) or from `--config`.
//! `CATALOG_FILTERS__SECTION__KEY` environment variables override the file.

use catalog_filters::{
    Result,
    catalog::MemoryCatalog,
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    logging::{LogConfig, init_logging},
    ui::{OutputWriter, StdoutWriter},
};
use std::process::ExitCode;
use tracing::debug;

fn run(cli: &Cli, out: &dyn OutputWriter) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_from(&config_path)?;
    debug!(path = %config_path.display(), "configuration loaded");

    match cli.get_command() {
        Commands::Browse { query, debounce_ms } => {
            commands::browse(&config, query.as_deref(), debounce_ms, out)
        }
        Commands::Replay { script, json } => commands::replay(&script, &config.sync, json, out),
        Commands::Parse { query, json } => commands::parse(&query, json, out, cli.quiet),
        Commands::Products { query, json } => {
            let catalog = MemoryCatalog::from_settings(&config.catalog)?;
            commands::products(&catalog, query.as_deref(), json, out, cli.quiet)
        }
        Commands::Config { command } => commands::config(&command, &config, &config_path, out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let out = StdoutWriter::new(cli.quiet);

    let log_config = LogConfig::from_verbosity(cli.verbose).with_log_file(cli.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        out.error(&format!("Failed to initialize logging: {e}"));
        return ExitCode::FAILURE;
    }

    match run(&cli, &out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
