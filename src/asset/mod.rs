//! Asset discovery and ordering.
//!
//! ```text
//! walk ──► exclude ─┬─► stylesheet (compile sources, keep order)
//!                   └─► script     (library, root-level, general)
//! ```

mod exclude;
mod script;
mod stylesheet;
mod walk;

// Discovery
pub use walk::{FileCandidate, Walker, walk};

// Filtering
pub use exclude::{ExcludeFilter, exclude};

// Ordering
pub use script::{LIB_DIR, PathClassification, classify_scripts};

// Compilation (side effects)
pub use stylesheet::Materializer;
