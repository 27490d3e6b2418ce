//! Stylesheet compilation seam.
//!
//! The materializer only needs `source text -> compiled text`. Anything
//! implementing [`StylesheetCompiler`] can be plugged into a
//! [`Resolver`](crate::Resolver): the bundled [`CommandCompiler`] runs an
//! external preprocessor, and plain closures work for embedding and tests.

mod command;

use std::path::Path;

pub use command::{CommandCompiler, INPUT_ENV};

/// A pure `source -> css` transformation.
///
/// `context` is the path of the source file. Implementations use it for
/// diagnostics and relative imports; they must not write files.
pub trait StylesheetCompiler: Send + Sync {
    fn compile(&self, source: &str, context: &Path) -> Result<String, String>;
}

impl<F> StylesheetCompiler for F
where
    F: Fn(&str, &Path) -> Result<String, String> + Send + Sync,
{
    fn compile(&self, source: &str, context: &Path) -> Result<String, String> {
        self(source, context)
    }
}
