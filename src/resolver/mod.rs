//! Resolution facade.
//!
//! Picks a strategy per request and assembles the final `{css, js}` set:
//!
//! | optimize.enable | request.debug | strategy                         |
//! |-----------------|---------------|----------------------------------|
//! | false           | any           | development (walk + compile)     |
//! | true            | true          | development, debug script URLs   |
//! | true            | false         | optimized (bundle URLs, no I/O)  |
//!
//! # Example
//!
//! ```ignore
//! let resolver = Resolver::from_config(AssetConfig::load(path)?);
//! let set = resolver.resolve(&PageRequest::new("checkout").debug(true))?;
//! for src in &set.js {
//!     println!("<script src=\"{src}\"></script>");
//! }
//! ```

mod optimized;

use std::path::{Component, Path};
use std::sync::Arc;

use serde::Serialize;

use crate::asset::{ExcludeFilter, Materializer, Walker, classify_scripts};
use crate::compiler::{CommandCompiler, StylesheetCompiler};
use crate::config::AssetConfig;
use crate::debug;
use crate::error::{AssetError, Result};

pub use optimized::{bundle_paths, optimized_paths, render_resource_root};

/// Script extensions picked up in development mode.
const SCRIPT_EXTENSIONS: &[&str] = &["js"];

/// One resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Page name; a subdirectory of the client root.
    pub page: String,
    /// Force development resolution and unbundled script loading.
    pub debug: bool,
}

impl PageRequest {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            debug: false,
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Ordered browser pathnames for one page, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetPathSet {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

/// Resolves page asset paths against a frozen configuration.
///
/// Cheap to clone and safe to share across threads; each call keeps its
/// working data local.
#[derive(Clone)]
pub struct Resolver {
    config: Arc<AssetConfig>,
    compiler: Arc<dyn StylesheetCompiler>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(config: AssetConfig, compiler: impl StylesheetCompiler + 'static) -> Self {
        Self {
            config: Arc::new(config),
            compiler: Arc::new(compiler),
        }
    }

    /// Build a resolver compiling stylesheets with `[stylesheet].command`.
    pub fn from_config(config: AssetConfig) -> Self {
        let compiler = CommandCompiler::new(config.stylesheet.command.clone());
        Self::new(config, compiler)
    }

    /// Resolve the asset set for a request.
    pub fn resolve(&self, request: &PageRequest) -> Result<AssetPathSet> {
        if !self.config.optimize.enable || request.debug {
            debug!("resolve"; "{}: development (debug={})", request.page, request.debug);
            self.development(&request.page, request.debug)
        } else {
            debug!("resolve"; "{}: optimized", request.page);
            self.optimized(&request.page)
        }
    }

    /// Shorthand for `resolve(&PageRequest::new(page).debug(debug))`.
    pub fn paths(&self, page: &str, debug: bool) -> Result<AssetPathSet> {
        self.resolve(&PageRequest::new(page).debug(debug))
    }

    fn optimized(&self, page: &str) -> Result<AssetPathSet> {
        let optimize = &self.config.optimize;
        optimized_paths(&optimize.resource_root, &optimize.version, page)
    }

    /// Walk the page directory, compiling stylesheets and ordering scripts.
    ///
    /// The CSS and JS branches run concurrently. If both fail, the CSS
    /// branch's error is returned.
    fn development(&self, page: &str, debug: bool) -> Result<AssetPathSet> {
        let page_dir = self.page_dir(page)?;
        let exclude = ExcludeFilter::new(&self.config.exclude, &self.config.client_dir)?;
        let walker = self.config.walk.walker();

        let (css, js) = rayon::join(
            || self.stylesheets(&walker, &exclude, &page_dir),
            || self.scripts(&walker, &exclude, &page_dir, debug),
        );

        match (css, js) {
            (Ok(css), Ok(js)) => Ok(AssetPathSet { css, js }),
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    /// Directory of `page`, rejecting names that are not a single segment.
    fn page_dir(&self, page: &str) -> Result<std::path::PathBuf> {
        let mut components = Path::new(page).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.config.page_dir(page)),
            _ => Err(AssetError::io(
                self.config.page_dir(page),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid page name `{page}`"),
                ),
            )),
        }
    }

    fn stylesheets(
        &self,
        walker: &Walker,
        exclude: &ExcludeFilter,
        page_dir: &Path,
    ) -> Result<Vec<String>> {
        let sheet = &self.config.stylesheet;
        let candidates = walker
            .clone()
            .extensions([sheet.source_ext(), sheet.compiled_ext()])
            .walk(page_dir)?;
        let candidates = exclude.filter(candidates);

        Materializer::new(
            &self.config.client_dir,
            &self.config.build_dir,
            self.compiler.as_ref(),
        )
        .extensions(sheet.source_ext(), sheet.compiled_ext())
        .materialize(&candidates)
    }

    fn scripts(
        &self,
        walker: &Walker,
        exclude: &ExcludeFilter,
        page_dir: &Path,
        debug: bool,
    ) -> Result<Vec<String>> {
        let candidates = walker
            .clone()
            .extensions(SCRIPT_EXTENSIONS)
            .walk(page_dir)?;
        let candidates = exclude.filter(candidates);

        classify_scripts(&candidates, &self.config.client_dir, debug)
    }
}

#[cfg(test)]
mod tests;
