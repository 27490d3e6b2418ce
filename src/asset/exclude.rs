//! Exclusion filter.
//!
//! Drops candidate paths matching a configured glob. A pattern without a
//! `/` is tested against every segment of the path relative to the client
//! root (the file name and each directory name), so `*.test.js` hides
//! test files and `fixtures` hides a whole directory. A pattern with a `/`
//! is tested against the full relative form (`home/lib/**`).

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{AssetError, Result};
use crate::utils::path::relative_segments;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Compiled exclusion glob bound to the root paths are relative to.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    pattern: Option<Pattern>,
    segment_match: bool,
    root: PathBuf,
}

impl ExcludeFilter {
    /// Compile `glob`. An empty pattern excludes nothing.
    pub fn new(glob: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let glob = glob.trim();
        let pattern = if glob.is_empty() {
            None
        } else {
            Some(Pattern::new(glob).map_err(|e| {
                AssetError::Configuration(format!("invalid exclude pattern `{glob}`: {e}"))
            })?)
        };

        Ok(Self {
            pattern,
            segment_match: !glob.contains('/'),
            root: root.into(),
        })
    }

    /// Whether the filter can exclude anything at all.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Whether `path` matches the exclusion pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(pattern) = &self.pattern else {
            return false;
        };

        let segments = relative_segments(path, &self.root).unwrap_or_else(|| {
            path.iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect()
        });

        if self.segment_match {
            segments
                .iter()
                .any(|segment| pattern.matches_with(segment, MATCH_OPTIONS))
        } else {
            pattern.matches_with(&segments.join("/"), MATCH_OPTIONS)
        }
    }

    /// Keep the items that do not match, preserving input order.
    pub fn filter<P: AsRef<Path>>(&self, paths: Vec<P>) -> Vec<P> {
        if !self.is_active() {
            return paths;
        }
        paths
            .into_iter()
            .filter(|p| !self.is_excluded(p.as_ref()))
            .collect()
    }
}

/// Remove every path matching `glob` (relative to `root`) from `paths`.
pub fn exclude<P: AsRef<Path>>(paths: Vec<P>, glob: &str, root: &Path) -> Result<Vec<P>> {
    Ok(ExcludeFilter::new(glob, root)?.filter(paths))
}
