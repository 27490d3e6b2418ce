//! `check` command: validate the configuration.

use anyhow::Result;
use pageassets::config::{AssetConfig, ConfigError};
use pageassets::log;
use pageassets::utils::plural::plural_count;

/// Validate `config`, printing diagnostics.
pub fn run_check(config: &AssetConfig) -> Result<()> {
    match config.validate() {
        Ok(diag) => {
            diag.print_warnings();
            let pages = config.pages().map(|p| p.len()).unwrap_or(0);
            log!(
                "check";
                "ok: {} in {}",
                plural_count(pages, "page"),
                config.client_dir.display()
            );
            if config.optimize.enable {
                log!("check"; "optimized mode, resource root {}", config.optimize.resource_root_url()?);
            }
            Ok(())
        }
        Err(ConfigError::Diagnostics(diag)) => {
            diag.print_warnings();
            Err(ConfigError::Diagnostics(diag).into())
        }
        Err(e) => Err(e.into()),
    }
}
