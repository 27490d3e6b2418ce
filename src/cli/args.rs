//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use pageassets::config::{CONFIG_FILE, ConfigOverrides};
use std::path::PathBuf;

/// Resolve ordered css/js asset paths for web client pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the ordered css/js paths for a page
    #[command(visible_alias = "r")]
    Resolve {
        /// Page name (subdirectory of the client directory)
        page: String,

        /// Force development resolution with unbundled script URLs
        #[arg(short, long)]
        debug: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// List the pages found in the client directory
    #[command(visible_alias = "p")]
    Pages {
        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Validate the configuration
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// How `resolve` prints its result.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"css": [...], "js": [...]}`
    Json,
    /// Pretty-printed JSON
    Pretty,
    /// One `css <path>` / `js <path>` line per asset
    Lines,
}

/// Flags overriding values from the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Client source directory
    #[arg(long = "client", value_hint = clap::ValueHint::DirPath)]
    pub client_dir: Option<PathBuf>,

    /// Build output directory for compiled stylesheets
    #[arg(long = "build", value_hint = clap::ValueHint::DirPath)]
    pub build_dir: Option<PathBuf>,

    /// Exclusion glob (empty string disables exclusion)
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Enable optimized mode (precomputed bundle URLs)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub optimized: Option<bool>,

    /// Versioned resource root template, e.g. `//cdn/app/<%= version %>`
    #[arg(long = "resource-root", value_hint = clap::ValueHint::Url)]
    pub resource_root: Option<String>,

    /// Application version substituted into the resource root
    #[arg(long = "app-version")]
    pub app_version: Option<String>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            client_dir: args.client_dir,
            build_dir: args.build_dir,
            exclude: args.exclude,
            optimized: args.optimized,
            resource_root: args.resource_root,
            app_version: args.app_version,
        }
    }
}

impl Commands {
    pub fn overrides(&self) -> &OverrideArgs {
        match self {
            Self::Resolve { overrides, .. }
            | Self::Pages { overrides }
            | Self::Check { overrides } => overrides,
        }
    }
}
