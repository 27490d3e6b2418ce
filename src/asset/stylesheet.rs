//! Stylesheet materializer.
//!
//! Compiles preprocessor sources into the build directory and maps every
//! stylesheet to the browser pathname of its compiled form:
//!
//! ```text
//! client/home/theme.styl  -> build/home/theme.css  -> /home/theme.css
//! client/home/reset.css   -> (untouched)           -> /home/reset.css
//! ```
//!
//! Sources are recompiled on every call; there is no freshness check.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::compiler::StylesheetCompiler;
use crate::debug;
use crate::error::{AssetError, Result};
use crate::utils::path::{browser_path, ensure_dir, relative_segments};

use super::FileCandidate;

/// Compiles stylesheet sources for one request.
pub struct Materializer<'a> {
    client_root: &'a Path,
    build_root: &'a Path,
    source_ext: &'a str,
    compiled_ext: &'a str,
    compiler: &'a dyn StylesheetCompiler,
}

impl<'a> Materializer<'a> {
    pub fn new(
        client_root: &'a Path,
        build_root: &'a Path,
        compiler: &'a dyn StylesheetCompiler,
    ) -> Self {
        Self {
            client_root,
            build_root,
            source_ext: "styl",
            compiled_ext: "css",
            compiler,
        }
    }

    /// Set the preprocessor-source and compiled extensions (without dots).
    pub fn extensions(mut self, source_ext: &'a str, compiled_ext: &'a str) -> Self {
        self.source_ext = source_ext;
        self.compiled_ext = compiled_ext;
        self
    }

    /// Relative segments of `path` under the client root.
    fn segments(&self, path: &Path) -> Result<Vec<String>> {
        relative_segments(path, self.client_root)
            .ok_or_else(|| AssetError::outside_root(path, self.client_root))
    }

    /// Where the compiled form of `source` is written.
    pub fn compiled_target(&self, source: &Path) -> Result<PathBuf> {
        let rel = source
            .strip_prefix(self.client_root)
            .map_err(|_| AssetError::outside_root(source, self.client_root))?;
        Ok(self.build_root.join(rel).with_extension(self.compiled_ext))
    }

    /// Compile one source file and write it to its build target.
    fn compile_one(&self, source: &Path) -> Result<PathBuf> {
        let text = fs::read_to_string(source).map_err(|e| AssetError::io(source, e))?;
        let css = self
            .compiler
            .compile(&text, source)
            .map_err(|message| AssetError::compile(source, message))?;

        let target = self.compiled_target(source)?;
        if let Some(parent) = target.parent() {
            ensure_dir(parent).map_err(|e| AssetError::io(parent, e))?;
        }
        fs::write(&target, css).map_err(|e| AssetError::io(&target, e))?;

        debug!("stylesheet"; "{} -> {}", source.display(), target.display());
        Ok(target)
    }

    /// Browser pathname for one candidate, compiling it first if needed.
    fn materialize_one(&self, candidate: &FileCandidate) -> Result<String> {
        let mut segments = self.segments(&candidate.path)?;

        if candidate.has_ext(self.source_ext) {
            self.compile_one(&candidate.path)?;
            if let Some(name) = segments.last_mut() {
                *name = Path::new(name.as_str())
                    .with_extension(self.compiled_ext)
                    .to_string_lossy()
                    .into_owned();
            }
        }

        Ok(browser_path(&segments, false))
    }

    /// Materialize every candidate, in parallel, failing on the first error.
    ///
    /// The result follows candidate order. When a source and its compiled
    /// sibling were both discovered, the pathname appears once, at the
    /// position of whichever came first.
    pub fn materialize(&self, candidates: &[FileCandidate]) -> Result<Vec<String>> {
        let pathnames: Vec<String> = candidates
            .par_iter()
            .map(|candidate| self.materialize_one(candidate))
            .collect::<Result<_>>()?;

        let mut seen = HashSet::with_capacity(pathnames.len());
        Ok(pathnames
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect())
    }
}
