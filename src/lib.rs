//! Resolve the ordered CSS and JavaScript paths a web client page loads.
//!
//! In development, a page's directory is walked on every call: stylesheet
//! sources are compiled into the build directory and scripts are ordered
//! library first, then page-root entry points, then everything else. In
//! optimized mode, versioned bundle URLs are returned without touching the
//! filesystem.
//!
//! ```ignore
//! use pageassets::{AssetConfig, Resolver};
//!
//! let resolver = Resolver::from_config(AssetConfig::load("pageassets.toml".as_ref())?);
//! let set = resolver.paths("checkout", false)?;
//! ```

pub mod asset;
pub mod compiler;
pub mod config;
pub mod error;
pub mod logger;
pub mod resolver;
pub mod utils;

pub use compiler::{CommandCompiler, StylesheetCompiler};
pub use config::AssetConfig;
pub use error::{AssetError, Result};
pub use resolver::{AssetPathSet, PageRequest, Resolver};
