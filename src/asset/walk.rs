//! Recursive tree walker.
//!
//! Enumerates regular files under a directory, optionally keeping only
//! those whose extension is in a given set. Directories are always
//! descended. Sibling entries are read on the rayon pool by `jwalk`,
//! except when the walk itself runs on a rayon worker, where it reads
//! serially on the calling thread.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

use crate::debug;
use crate::error::{AssetError, Result};
use crate::utils::path::extension_of;

/// A discovered file: absolute path plus its extension (without the dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub ext: Option<String>,
}

impl FileCandidate {
    pub fn new(path: PathBuf) -> Self {
        let ext = extension_of(&path).map(str::to_owned);
        Self { path, ext }
    }

    /// Whether the extension equals `ext` (given without the dot).
    #[inline]
    pub fn has_ext(&self, ext: &str) -> bool {
        self.ext.as_deref() == Some(ext)
    }
}

impl AsRef<Path> for FileCandidate {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Directory walker configuration.
///
/// # Example
///
/// ```ignore
/// let scripts = Walker::new().extensions(["js"]).walk(&page_dir)?;
/// ```
#[derive(Debug, Clone)]
pub struct Walker {
    extensions: Option<Vec<String>>,
    sort: bool,
    follow_links: bool,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            extensions: None,
            sort: true,
            follow_links: true,
        }
    }
}

impl Walker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only files with one of these extensions.
    ///
    /// A leading dot is accepted and ignored (`".css"` == `"css"`).
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Some(
            exts.into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_owned())
                .collect(),
        );
        self
    }

    /// Sort siblings by file name so discovery order is stable across runs.
    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Descend into symlinked directories and report symlinked files.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    fn accepts(&self, candidate: &FileCandidate) -> bool {
        match &self.extensions {
            None => true,
            Some(exts) => exts.iter().any(|e| candidate.has_ext(e)),
        }
    }

    /// Walk `root`, returning every matching regular file below it.
    ///
    /// All-or-nothing: an unreadable directory anywhere in the tree fails
    /// the whole walk.
    pub fn walk(&self, root: &Path) -> Result<Vec<FileCandidate>> {
        // jwalk reports an unreadable root as an entry error; probe it first
        // so the error names the root itself.
        fs::read_dir(root).map_err(|e| AssetError::io(root, e))?;

        let mut results = Vec::new();
        let entries = WalkDir::new(root)
            .sort(self.sort)
            .skip_hidden(false)
            .follow_links(self.follow_links)
            .parallelism(parallelism());

        for entry in entries {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_link(&err) => {
                    debug!("walk"; "skipping dangling link {}", err.path().unwrap_or(root).display());
                    continue;
                }
                Err(err) => return Err(walk_error(root, err)),
            };

            // Directories that could not be listed carry the error on
            // their own entry instead of yielding one.
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(root, err));
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let candidate = FileCandidate::new(entry.path());
            if self.accepts(&candidate) {
                results.push(candidate);
            }
        }

        debug!("walk"; "{} under {}", crate::utils::plural::plural_count(results.len(), "file"), root.display());
        Ok(results)
    }
}

/// jwalk's default pool mode waits for a free worker and gives up after a
/// timeout, which never arrives when the caller already occupies the pool
/// (e.g. inside `rayon::join` on a single-thread pool).
fn parallelism() -> Parallelism {
    if rayon::current_thread_index().is_some() {
        Parallelism::Serial
    } else {
        Parallelism::RayonDefaultPool {
            busy_timeout: std::time::Duration::from_secs(1),
        }
    }
}

fn walk_error(root: &Path, err: jwalk::Error) -> AssetError {
    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    AssetError::io(path, std::io::Error::from(err))
}

/// A symlink whose target is missing. Not a regular file, so not an error.
fn is_dangling_link(err: &jwalk::Error) -> bool {
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|p| fs::symlink_metadata(p).ok())
            .is_some_and(|m| m.file_type().is_symlink())
}

/// Walk `root` and return matching file paths.
///
/// With `extensions` of `None`, every regular file is returned.
pub fn walk(root: &Path, extensions: Option<&[&str]>) -> Result<Vec<PathBuf>> {
    let walker = match extensions {
        Some(exts) => Walker::new().extensions(exts),
        None => Walker::new(),
    };
    Ok(walker
        .walk(root)?
        .into_iter()
        .map(|c| c.path)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn rel_set(root: &Path, paths: &[PathBuf]) -> BTreeSet<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walk_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app.js");
        touch(root, "style.css");
        touch(root, "theme.styl");
        touch(root, "notes.txt");
        touch(root, "widgets/deep/er/foo.js");

        let js = walk(root, Some(&["js"])).unwrap();
        assert_eq!(
            rel_set(root, &js),
            BTreeSet::from(["app.js".into(), "widgets/deep/er/foo.js".into()])
        );

        let css = walk(root, Some(&[".css", ".styl"])).unwrap();
        assert_eq!(
            rel_set(root, &css),
            BTreeSet::from(["style.css".into(), "theme.styl".into()])
        );
    }

    #[test]
    fn test_walk_without_filter_returns_all_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.js");
        touch(root, "b/c.txt");
        touch(root, "b/.hidden");
        fs::create_dir_all(root.join("empty")).unwrap();

        let all = walk(root, None).unwrap();
        assert_eq!(
            rel_set(root, &all),
            BTreeSet::from(["a.js".into(), "b/c.txt".into(), "b/.hidden".into()])
        );
    }

    #[test]
    fn test_walk_directories_ignore_extension_filter() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "vendor.js/inner.js");

        let js = walk(root, Some(&["js"])).unwrap();
        assert_eq!(rel_set(root, &js), BTreeSet::from(["vendor.js/inner.js".into()]));
    }

    #[test]
    fn test_walk_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = walk(&missing, Some(&["js"])).unwrap_err();
        assert!(matches!(err, AssetError::Io { ref path, .. } if *path == missing));
    }

    #[test]
    fn test_walk_sorted_is_stable() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for name in ["c.js", "a.js", "b.js", "lib/z.js", "lib/y.js"] {
            touch(root, name);
        }

        let first = walk(root, Some(&["js"])).unwrap();
        let second = walk(root, Some(&["js"])).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app.js");
        // Editor lock files are symlinks to a nonexistent target.
        std::os::unix::fs::symlink("user@host.1234:99", root.join(".#app.js")).unwrap();
        std::os::unix::fs::symlink("gone/missing.js", root.join("stale.js")).unwrap();

        let js = walk(root, Some(&["js"])).unwrap();
        assert_eq!(rel_set(root, &js), BTreeSet::from(["app.js".into()]));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_unreadable_subdirectory_fails_whole_walk() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app.js");
        touch(root, "sub/inner.js");
        let sub = root.join("sub");
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not restrict root.
        if fs::read_dir(&sub).is_ok() {
            fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = walk(root, Some(&["js"]));
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, AssetError::Io { ref path, .. } if path.ends_with("sub")));
    }

    #[test]
    fn test_walk_on_single_thread_pool() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.js");
        touch(root, "lib/b.js");

        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let js = pool.install(|| walk(root, Some(&["js"]))).unwrap();
        assert_eq!(
            rel_set(root, &js),
            BTreeSet::from(["a.js".into(), "lib/b.js".into()])
        );
    }

    #[test]
    fn test_candidate_extension() {
        let c = FileCandidate::new(PathBuf::from("/x/home/main.styl"));
        assert!(c.has_ext("styl"));
        assert!(!c.has_ext("css"));
        assert_eq!(FileCandidate::new(PathBuf::from("/x/README")).ext, None);
    }
}
