//! Configuration management for `pageassets.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [optimize], [stylesheet], [walk]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! ├── util.rs        # config file discovery
//! └── mod.rs         # AssetConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! client_dir = "client"
//! build_dir = "build"
//! exclude = "*.test.js"
//!
//! [optimize]
//! enable = false
//! resource_root = "//cdn.example.com/app/<%= version %>"
//! version = "1.4.2"
//! ```
//!
//! A loaded config is frozen by handing it to a [`Resolver`](crate::Resolver);
//! there is no process-wide instance.

pub mod section;
pub mod types;
mod util;

pub use section::{OptimizeConfig, StylesheetConfig, WalkConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use util::find_config_file;

use crate::asset::ExcludeFilter;
use crate::log;
use crate::utils::path::normalize_path;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "pageassets.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pageassets.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the config was loaded from (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Client source root; each page is a subdirectory
    pub client_dir: PathBuf,

    /// Build output root for compiled stylesheets
    pub build_dir: PathBuf,

    /// Glob of paths to leave out of results (empty: keep everything)
    pub exclude: String,

    /// Optimized-mode settings
    pub optimize: OptimizeConfig,

    /// Stylesheet compiler settings
    pub stylesheet: StylesheetConfig,

    /// Directory traversal settings
    pub walk: WalkConfig,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            client_dir: PathBuf::from("client"),
            build_dir: PathBuf::from("build"),
            exclude: String::new(),
            optimize: OptimizeConfig::default(),
            stylesheet: StylesheetConfig::default(),
            walk: WalkConfig::default(),
        }
    }
}

/// Values that override the loaded file, field by field.
///
/// `None` leaves the file's value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub client_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub exclude: Option<String>,
    pub optimized: Option<bool>,
    pub resource_root: Option<String>,
    pub app_version: Option<String>,
}

impl AssetConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Relative directories are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.finalize(&root);
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Resolve directories against `root` and make them absolute.
    pub fn finalize(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.client_dir = normalize_path(&root.join(&self.client_dir));
        self.build_dir = normalize_path(&root.join(&self.build_dir));
        self.root = root;
    }

    /// Apply overrides (CLI flags, embedder settings) on top of this config.
    ///
    /// Override directories are resolved against the current directory,
    /// like any path typed on a command line.
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.client_dir {
            self.client_dir = normalize_path(&dir);
        }
        if let Some(dir) = overrides.build_dir {
            self.build_dir = normalize_path(&dir);
        }
        Self::update_option(&mut self.exclude, overrides.exclude);
        Self::update_option(&mut self.optimize.enable, overrides.optimized);
        Self::update_option(&mut self.optimize.resource_root, overrides.resource_root);
        Self::update_option(&mut self.optimize.version, overrides.app_version);
    }

    /// Update config option if a value is provided.
    fn update_option<T>(config_option: &mut T, value: Option<T>) {
        if let Some(value) = value {
            *config_option = value;
        }
    }

    /// Directory holding the assets of `page`.
    pub fn page_dir(&self, page: &str) -> PathBuf {
        self.client_dir.join(page)
    }

    /// Names of all pages (immediate subdirectories of the client root), sorted.
    pub fn pages(&self) -> std::io::Result<Vec<String>> {
        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.client_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                pages.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        pages.sort();
        Ok(pages)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all problems at once.
    ///
    /// Returns the diagnostics (warnings only) on success.
    pub fn validate(&self) -> Result<ConfigDiagnostics, ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if !self.client_dir.is_dir() {
            diag.error_with_hint(
                "client_dir",
                format!("client directory not found: {}", self.client_dir.display()),
                "create it or point client_dir at the web client sources",
            );
        }

        if self.build_dir.starts_with(&self.client_dir) {
            diag.warn(
                "build_dir",
                "build_dir is inside client_dir; compiled stylesheets will be rediscovered",
            );
        }

        if let Err(e) = ExcludeFilter::new(&self.exclude, &self.client_dir) {
            diag.error("exclude", e.to_string());
        }

        self.optimize.validate(&mut diag);
        self.stylesheet.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AssetConfig {
    let (parsed, ignored) = AssetConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = AssetConfig::from_str("[optimize\nenable = true");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.client_dir, PathBuf::from("client"));
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "client_dir = \"web\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = AssetConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.client_dir, PathBuf::from("web"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "client_dir = \"web/src\"\nbuild_dir = \"out\"").unwrap();

        let config = AssetConfig::load(&path).unwrap();
        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.client_dir, root.join("web/src"));
        assert_eq!(config.build_dir, root.join("out"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = AssetConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = test_parse_config("exclude = \"*.spec.js\"\n[optimize]\nversion = \"1\"");
        config.merge(ConfigOverrides {
            optimized: Some(true),
            app_version: Some("2".into()),
            ..Default::default()
        });
        assert!(config.optimize.enable);
        assert_eq!(config.optimize.version, "2");
        assert_eq!(config.exclude, "*.spec.js");
    }

    #[test]
    fn test_pages_lists_directories() {
        let dir = TempDir::new().unwrap();
        let mut config = AssetConfig::default();
        config.finalize(dir.path());
        fs::create_dir_all(config.client_dir.join("checkout")).unwrap();
        fs::create_dir_all(config.client_dir.join("home")).unwrap();
        fs::write(config.client_dir.join("README.md"), "").unwrap();

        assert_eq!(config.pages().unwrap(), vec!["checkout", "home"]);
    }

    #[test]
    fn test_validate_reports_missing_client_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("[stylesheet]\ncommand = [\"sh\"]");
        config.finalize(dir.path());

        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert!(diag.errors().iter().any(|e| e.field == "client_dir"));
    }

    #[test]
    fn test_validate_invalid_exclude() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("exclude = \"[\"");
        config.finalize(dir.path());

        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert!(diag.errors().iter().any(|e| e.field == "exclude"));
    }
}
