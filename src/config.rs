//! Toolkit configuration (`.pirepe/config.toml`).
//!
//! Defines the typed configuration for the library path, import defaults,
//! and export output. Missing fields use sensible defaults; a missing file
//! means all defaults (no error).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::reconcile::Policy;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = ".pirepe/config.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level toolkit configuration.
///
/// Parsed from `.pirepe/config.toml`. Missing fields use sensible defaults.
/// Missing file → all defaults (no error).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct PirepeConfig {
    /// Library storage settings.
    #[serde(default)]
    pub library: LibraryConfig,

    /// Import behaviour settings.
    #[serde(default)]
    pub import: ImportConfig,

    /// Export output settings.
    #[serde(default)]
    pub export: ExportConfig,
}

// ---------------------------------------------------------------------------
// LibraryConfig
// ---------------------------------------------------------------------------

/// Library storage settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Path to the library JSON file (default: `.pirepe/library.json`).
    #[serde(default = "default_library_path")]
    pub path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

fn default_library_path() -> PathBuf {
    PathBuf::from(".pirepe/library.json")
}

// ---------------------------------------------------------------------------
// ImportConfig
// ---------------------------------------------------------------------------

/// Import behaviour settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Duplicate-slug policy used when `--policy` is not given
    /// (default: `"skip"`).
    #[serde(default)]
    pub policy: Policy,

    /// Maximum number of skipped/overwritten slugs shown per collection in
    /// the import summary. Totals are always reported in full.
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            report_limit: default_report_limit(),
        }
    }
}

const fn default_report_limit() -> usize {
    10
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Export output settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Output file name used when `--out` is not given
    /// (default: `"pirepe-patterns.json"`).
    #[serde(default = "default_export_filename")]
    pub filename: PathBuf,

    /// Pretty-print the exported JSON (default: `true`).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
            pretty: default_pretty(),
        }
    }
}

fn default_export_filename() -> PathBuf {
    PathBuf::from("pirepe-patterns.json")
}

const fn default_pretty() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a toolkit configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl PirepeConfig {
    /// Load configuration from a TOML file.
    ///
    /// - If the file does not exist, returns all defaults (not an error).
    /// - If the file exists but contains invalid TOML or unknown fields,
    ///   returns a [`ConfigError`] with line-level detail.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse
    /// errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                // Calculate line number from byte offset.
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}

/// The commented default config written by `pirepe init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# pirepe configuration

[library]
# Where the pattern library is stored.
path = ".pirepe/library.json"

[import]
# Duplicate-slug policy: "skip" keeps existing items, "overwrite" replaces them.
policy = "skip"
# How many skipped/overwritten slugs to show per collection in the summary.
report_limit = 10

[export]
filename = "pirepe-patterns.json"
pretty = true
"#
    .to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
