//! Unified error type for pattern toolkit operations.
//!
//! Defines [`PirepeError`], covering the import/export failure taxonomy:
//! missing input file, undecodable or empty bundles, empty-library exports,
//! plus the surrounding I/O, config, and library-file failures. Messages are
//! designed to be actionable: each variant says what went wrong and how to
//! fix it.
//!
//! The reconciler itself has no error states — invalid items are filtered at
//! the bundle boundary and never reach it.

use std::fmt;
use std::path::PathBuf;

use crate::model::slug::ValidationError;

// ---------------------------------------------------------------------------
// PirepeError
// ---------------------------------------------------------------------------

/// Unified error type for library, import, and export operations.
#[derive(Debug)]
pub enum PirepeError {
    /// The import file was not found or could not be opened.
    MissingFile {
        /// The path that was given.
        path: PathBuf,
    },

    /// The import payload is not a decodable bundle, or contains no items.
    InvalidBundle {
        /// Human-readable description of what failed to decode.
        detail: String,
    },

    /// Export was requested but the library holds no items.
    NothingToExport,

    /// The stored library file exists but cannot be parsed.
    LibraryCorrupted {
        /// Path to the library file.
        path: PathBuf,
        /// Human-readable description of the corruption.
        detail: String,
    },

    /// A configuration file could not be loaded or parsed.
    Config {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// A slug failed validation at a typed boundary.
    InvalidSlug(ValidationError),

    /// An I/O error occurred.
    Io(std::io::Error),
}

impl fmt::Display for PirepeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile { path } => {
                write!(
                    f,
                    "import file '{}' not found.\n  To fix: check the path, or export a bundle first:\n    pirepe export",
                    path.display()
                )
            }
            Self::InvalidBundle { detail } => {
                write!(
                    f,
                    "invalid or empty bundle: {detail}\n  To fix: import a JSON document with at least one of the keys\n    patterns, templates, templateParts, syncedPatterns"
                )
            }
            Self::NothingToExport => {
                write!(
                    f,
                    "nothing to export — the library is empty.\n  To fix: import a bundle first:\n    pirepe import <file>"
                )
            }
            Self::LibraryCorrupted { path, detail } => {
                write!(
                    f,
                    "library file '{}' is corrupted: {detail}\n  To fix: restore the file from a backup or an exported bundle, or delete it to start empty.",
                    path.display()
                )
            }
            Self::Config { path, detail } => {
                write!(
                    f,
                    "configuration error in '{}': {detail}\n  To fix: edit the config file and correct the issue.",
                    path.display()
                )
            }
            Self::InvalidSlug(err) => {
                write!(
                    f,
                    "{err}\n  Slugs are lowercase alphanumeric with hyphens/underscores and at most one '/'.\n  Examples: hero-banner, twentytwentyfive/cta"
                )
            }
            Self::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}\n  To fix: check file permissions and disk space."
                )
            }
        }
    }
}

impl std::error::Error for PirepeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidSlug(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<std::io::Error> for PirepeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ValidationError> for PirepeError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidSlug(err)
    }
}

impl From<crate::config::ConfigError> for PirepeError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config {
            path: err.path.unwrap_or_default(),
            detail: err.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_file() {
        let err = PirepeError::MissingFile {
            path: PathBuf::from("bundle.json"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("bundle.json"));
        assert!(msg.contains("not found"));
        assert!(msg.contains("pirepe export"));
    }

    #[test]
    fn display_invalid_bundle() {
        let err = PirepeError::InvalidBundle {
            detail: "expected an object at line 1".to_owned(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("invalid or empty bundle"));
        assert!(msg.contains("expected an object"));
        assert!(msg.contains("syncedPatterns"));
    }

    #[test]
    fn display_nothing_to_export() {
        let msg = format!("{}", PirepeError::NothingToExport);
        assert!(msg.contains("library is empty"));
        assert!(msg.contains("pirepe import"));
    }

    #[test]
    fn display_library_corrupted() {
        let err = PirepeError::LibraryCorrupted {
            path: PathBuf::from(".pirepe/library.json"),
            detail: "trailing comma".to_owned(),
        };
        let msg = format!("{err}");
        assert!(msg.contains(".pirepe/library.json"));
        assert!(msg.contains("trailing comma"));
        assert!(msg.contains("backup"));
    }

    #[test]
    fn display_config() {
        let err = PirepeError::Config {
            path: PathBuf::from(".pirepe/config.toml"),
            detail: "unknown field 'foo'".to_owned(),
        };
        let msg = format!("{err}");
        assert!(msg.contains(".pirepe/config.toml"));
        assert!(msg.contains("unknown field 'foo'"));
    }

    #[test]
    fn display_invalid_slug() {
        let err = PirepeError::InvalidSlug(ValidationError {
            value: "Bad Slug".to_owned(),
            reason: "contains disallowed character ' '".to_owned(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("Bad Slug"));
        assert!(msg.contains("lowercase alphanumeric"));
    }

    #[test]
    fn display_io() {
        let err = PirepeError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("permission denied"));
        assert!(msg.contains("file permissions"));
    }

    #[test]
    fn source_wiring() {
        let io = PirepeError::Io(std::io::Error::other("disk full"));
        assert!(std::error::Error::source(&io).is_some());
        assert!(std::error::Error::source(&PirepeError::NothingToExport).is_none());
    }

    #[test]
    fn from_config_error() {
        let cfg_err = crate::config::ConfigError {
            path: Some(PathBuf::from(".pirepe/config.toml")),
            message: "bad syntax".to_owned(),
        };
        let err: PirepeError = cfg_err.into();
        match err {
            PirepeError::Config { path, detail } => {
                assert_eq!(path, PathBuf::from(".pirepe/config.toml"));
                assert_eq!(detail, "bad syntax");
            }
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn from_validation_error() {
        let err: PirepeError = ValidationError {
            value: "X".to_owned(),
            reason: "uppercase".to_owned(),
        }
        .into();
        assert!(matches!(err, PirepeError::InvalidSlug(_)));
    }
}
