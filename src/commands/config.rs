//! Config command - show, locate or create the configuration file

use crate::{
    AppError, Result,
    cli::ConfigCommands,
    config::AppConfig,
    ui::output::OutputWriter,
};
use std::path::Path;

/// Execute a config subcommand against the file at `path`
///
/// `config` is the effective configuration (file plus environment).
///
/// # Errors
///
/// Returns `AppError::Config` if serialization or writing fails, or
/// `AppError::InvalidInput` when `init` would overwrite a file without `--force`.
pub fn execute(
    command: &ConfigCommands,
    config: &AppConfig,
    path: &Path,
    out: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Show => out.write(config.to_toml()?.trim_end()),
        ConfigCommands::Path => out.write(&path.display().to_string()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(AppError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            AppConfig::default().save_to(path)?;
            out.success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
