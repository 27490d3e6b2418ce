//! pageassets - resolve ordered css/js asset paths for web client pages.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use pageassets::log;

fn main() {
    if let Err(e) = run() {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    pageassets::logger::set_verbose(cli.verbose);

    let config = cli::load_config(&cli)?;

    match &cli.command {
        Commands::Resolve {
            page,
            debug,
            format,
            ..
        } => cli::resolve::run_resolve(config, page, *debug, *format),
        Commands::Pages { .. } => cli::resolve::run_pages(&config),
        Commands::Check { .. } => cli::check::run_check(&config),
    }
}
