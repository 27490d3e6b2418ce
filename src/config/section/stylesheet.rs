//! Stylesheet compilation configuration.
//!
//! # Example
//!
//! ```toml
//! [stylesheet]
//! source_ext = "styl"
//! compiled_ext = "css"
//! command = ["stylus", "--use", "nib"]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    /// Extension of preprocessor sources (without the dot).
    pub source_ext: String,
    /// Extension of compiled stylesheets (without the dot).
    pub compiled_ext: String,
    /// Compiler command; reads the source on stdin, writes CSS to stdout.
    pub command: Vec<String>,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            source_ext: "styl".into(),
            compiled_ext: "css".into(),
            command: vec!["stylus".into(), "--use".into(), "nib".into()],
        }
    }
}

impl StylesheetConfig {
    /// Source extension with any leading dot removed.
    pub fn source_ext(&self) -> &str {
        self.source_ext.trim_start_matches('.')
    }

    /// Compiled extension with any leading dot removed.
    pub fn compiled_ext(&self) -> &str {
        self.compiled_ext.trim_start_matches('.')
    }

    /// Validate stylesheet configuration.
    ///
    /// # Checks
    /// - both extensions are non-empty and differ
    /// - `command` is non-empty and `command[0]` is installed
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.source_ext().is_empty() || self.compiled_ext().is_empty() {
            diag.error(
                "stylesheet.source_ext",
                "stylesheet extensions must not be empty",
            );
        } else if self.source_ext() == self.compiled_ext() {
            diag.error(
                "stylesheet.compiled_ext",
                format!(
                    "source and compiled extensions are both `{}`",
                    self.source_ext()
                ),
            );
        }

        let Some(cmd) = self.command.first() else {
            diag.error("stylesheet.command", "stylesheet.command is empty");
            return;
        };

        if which::which(cmd).is_err() {
            diag.error_with_hint(
                "stylesheet.command",
                format!("`{cmd}` not found"),
                "install the compiler or update stylesheet.command",
            );
        }
    }
}
