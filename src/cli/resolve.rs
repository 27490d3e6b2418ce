//! `resolve` and `pages` commands.

use anyhow::{Context, Result};
use pageassets::{AssetConfig, AssetPathSet, PageRequest, Resolver, log};
use std::io::{Write, stdout};

use super::OutputFormat;

/// Resolve one page and print its asset set.
pub fn run_resolve(
    config: AssetConfig,
    page: &str,
    debug: bool,
    format: OutputFormat,
) -> Result<()> {
    let resolver = Resolver::from_config(config);
    let request = PageRequest::new(page).debug(debug);

    let set = resolver
        .resolve(&request)
        .with_context(|| format!("Failed to resolve assets for page `{page}`"))?;

    let mut out = stdout().lock();
    write_set(&mut out, &set, format)?;
    out.flush()?;
    Ok(())
}

/// Render an asset set in the requested format.
pub fn write_set(out: &mut impl Write, set: &AssetPathSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(set)?)?,
        OutputFormat::Pretty => writeln!(out, "{}", serde_json::to_string_pretty(set)?)?,
        OutputFormat::Lines => {
            for path in &set.css {
                writeln!(out, "css {path}")?;
            }
            for path in &set.js {
                writeln!(out, "js {path}")?;
            }
        }
    }
    Ok(())
}

/// Print the page names found under the client directory.
pub fn run_pages(config: &AssetConfig) -> Result<()> {
    let pages = config.pages().with_context(|| {
        format!(
            "Failed to list client directory `{}`",
            config.client_dir.display()
        )
    })?;

    if pages.is_empty() {
        log!("pages"; "no pages under {}", config.client_dir.display());
        return Ok(());
    }

    let mut out = stdout().lock();
    for page in pages {
        writeln!(out, "{page}")?;
    }
    Ok(())
}
