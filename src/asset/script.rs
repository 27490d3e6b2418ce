//! Script classifier.
//!
//! Turns discovered script files into browser pathnames and puts them in
//! load order by their position in the page tree:
//!
//! ```text
//! client/
//! └── home/
//!     ├── lib/vendor.js      -> Library    (loads first)
//!     ├── app.js             -> RootLevel  (entry points, after libraries)
//!     └── widgets/chart.js   -> General    (everything else, last)
//! ```
//!
//! Root-level entries are pushed to the front of their buffer as they are
//! discovered, so they come out in reverse discovery order. This is an
//! observable contract consumers rely on; keep it.

use std::collections::VecDeque;
use std::path::Path;

use crate::error::{AssetError, Result};
use crate::utils::path::{browser_path, relative_segments};

/// Name of the reserved library directory directly under a page root.
pub const LIB_DIR: &str = "lib";

/// Load-order class of a script, derived from its path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClassification {
    /// Directly inside the page directory (`home/app.js`).
    RootLevel,
    /// Under the page's `lib` directory (`home/lib/**`).
    Library,
    /// Anything nested elsewhere.
    General,
}

impl PathClassification {
    /// Classify segments relative to the client root (`[page, ..., file]`).
    pub fn of<S: AsRef<str>>(segments: &[S]) -> Self {
        if segments.len() == 2 {
            Self::RootLevel
        } else if segments.get(1).is_some_and(|s| s.as_ref() == LIB_DIR) {
            Self::Library
        } else {
            Self::General
        }
    }
}

/// Ordered buffers filled while classifying.
#[derive(Debug, Default)]
struct ScriptBuffers {
    library: Vec<String>,
    root_level: VecDeque<String>,
    general: Vec<String>,
}

impl ScriptBuffers {
    fn push(&mut self, class: PathClassification, pathname: String) {
        match class {
            PathClassification::RootLevel => self.root_level.push_front(pathname),
            PathClassification::Library => self.library.push(pathname),
            PathClassification::General => self.general.push(pathname),
        }
    }

    /// Library, then root-level, then general.
    fn into_ordered(self) -> Vec<String> {
        let mut ordered =
            Vec::with_capacity(self.library.len() + self.root_level.len() + self.general.len());
        ordered.extend(self.library);
        ordered.extend(self.root_level);
        ordered.extend(self.general);
        ordered
    }
}

/// Classify and order script paths for the browser.
///
/// `paths` must already be filtered and lie under `client_root`; a path
/// outside it is an IO error naming that path. With `debug`, every
/// pathname carries the script debug query marker.
pub fn classify_scripts<P: AsRef<Path>>(
    paths: &[P],
    client_root: &Path,
    debug: bool,
) -> Result<Vec<String>> {
    let mut buffers = ScriptBuffers::default();

    for path in paths {
        let path = path.as_ref();
        let segments = relative_segments(path, client_root)
            .ok_or_else(|| AssetError::outside_root(path, client_root))?;

        let class = PathClassification::of(&segments);
        buffers.push(class, browser_path(&segments, debug));
    }

    Ok(buffers.into_ordered())
}
