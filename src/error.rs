//! Error types for asset resolution.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by [`Resolver::resolve`](crate::Resolver::resolve).
///
/// Every failure in a walk, filter, compile, or write step aborts the
/// request. There is no partial asset set.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Directory unreadable, or file unreadable/unwritable.
    #[error("IO error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet compiler rejected its input.
    #[error("failed to compile `{}`: {message}", path.display())]
    Compile { path: PathBuf, message: String },

    /// Configuration unusable for the requested operation.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AssetError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn compile(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Compile {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// A path that does not lie under the root it must be relative to.
    pub fn outside_root(path: impl AsRef<Path>, root: &Path) -> Self {
        Self::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not under `{}`", root.display()),
            ),
        )
    }

    /// Path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Compile { path, .. } => Some(path),
            Self::Configuration(_) => None,
        }
    }
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;
