//! Optimized-mode configuration.
//!
//! # Example
//!
//! ```toml
//! [optimize]
//! enable = true
//! resource_root = "//cdn.example.com/app/<%= version %>"
//! version = "1.4.2"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::resolver::render_resource_root;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    /// Serve precomputed bundles instead of walking the client tree.
    pub enable: bool,
    /// URL template for the versioned resource root.
    pub resource_root: String,
    /// Application version substituted into `resource_root`.
    pub version: String,
}

impl OptimizeConfig {
    /// Render the versioned resource root.
    pub fn resource_root_url(&self) -> crate::Result<String> {
        render_resource_root(&self.resource_root, &self.version)
    }

    /// Validate optimize configuration.
    ///
    /// # Checks
    /// - If enabled, `resource_root` must render
    /// - If enabled, an empty `version` is reported as a warning
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if let Err(e) = self.resource_root_url() {
            diag.error_with_hint(
                "optimize.resource_root",
                e.to_string(),
                "use `<%= version %>` or `{{ version }}` as the version placeholder",
            );
        }

        if self.version.trim().is_empty() {
            diag.warn("optimize.version", "optimize.version is empty");
        }
    }
}
