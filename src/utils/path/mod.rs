//! Path and URL utilities.
//!
//! - [`fs`]: Filesystem path normalization and directory creation
//! - [`route`]: Browser pathname construction

pub mod fs;
pub mod route;

pub use fs::{ensure_dir, normalize_path};
pub use route::{SCRIPT_DEBUG_QUERY, browser_path, extension_of, relative_segments};
