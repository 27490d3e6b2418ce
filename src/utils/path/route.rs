//! Browser pathname utilities.
//!
//! Pure functions turning filesystem paths under a root directory into
//! root-absolute URL paths (`/page/js/app.js`). Separators are always `/`,
//! whatever the host platform uses.

use std::path::{Component, Path};

/// Query marker that forces unbundled, uncached script loading.
pub const SCRIPT_DEBUG_QUERY: &str = "__scriptdebug__=true";

/// Split `path` into its segments relative to `root`.
///
/// Returns `None` when `path` does not live under `root`.
///
/// # Examples
/// ```ignore
/// let segs = relative_segments(Path::new("/c/home/lib/a.js"), Path::new("/c"));
/// assert_eq!(segs, Some(vec!["home".into(), "lib".into(), "a.js".into()]));
/// ```
pub fn relative_segments(path: &Path, root: &Path) -> Option<Vec<String>> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    (!segments.is_empty()).then_some(segments)
}

/// Extension of `path` without the dot, if any.
#[inline]
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Join segments into a root-absolute browser pathname.
///
/// `?` and `#` inside segments are escaped so they cannot start a query
/// or fragment. With `debug`, the script debug marker is appended as the
/// query string.
pub fn browser_path<S: AsRef<str>>(segments: &[S], debug: bool) -> String {
    let mut pathname = String::from("/");
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            pathname.push('/');
        }
        for ch in segment.as_ref().chars() {
            match ch {
                '?' => pathname.push_str("%3F"),
                '#' => pathname.push_str("%23"),
                _ => pathname.push(ch),
            }
        }
    }

    if debug {
        pathname.push('?');
        pathname.push_str(SCRIPT_DEBUG_QUERY);
    }
    pathname
}
