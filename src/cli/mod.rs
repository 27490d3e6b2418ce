//! Command-line interface module.

mod args;
pub mod check;
pub mod resolve;

pub use args::{Cli, Commands, OutputFormat, OverrideArgs};

use anyhow::{Context, Result};
use pageassets::config::{AssetConfig, find_config_file};
use pageassets::debug;

/// Load the config file (if any) and apply command-line overrides.
///
/// Without a config file, defaults are resolved against the current
/// directory.
pub fn load_config(cli: &Cli) -> Result<AssetConfig> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;

    let mut config = match find_config_file(&cli.config, &cwd) {
        Some(path) => {
            debug!("config"; "using {}", path.display());
            AssetConfig::load(&path)
                .with_context(|| format!("Failed to load config `{}`", path.display()))?
        }
        None => {
            debug!("config"; "{} not found, using defaults", cli.config.display());
            let mut config = AssetConfig::default();
            config.finalize(&cwd);
            config
        }
    };

    config.merge(cli.command.overrides().clone().into());
    Ok(config)
}
