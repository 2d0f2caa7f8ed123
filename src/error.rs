//! Error types for camvirt
//!
//! Defines the error hierarchy used throughout the crate, the issue type
//! produced by schema validation, and the mapping from errors to process
//! exit codes.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::registry::RegistryKind;

// ============================================================================
// Exit codes
// ============================================================================

/// Standard exit codes for the camvirt binary.
#[derive(Debug, Clone, Copy)]
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const ERROR: i32 = 1;
    /// Configuration error (unreadable, unparsable, or invalid config)
    pub const CONFIG_ERROR: i32 = 2;
    /// I/O error
    pub const IO_ERROR: i32 = 3;
    /// Usage error (bad command-line arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-level error
// ============================================================================

/// Top-level error type for camvirt operations.
#[derive(Debug, Error)]
pub enum CamvirtError {
    /// Configuration loading or validation failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CamvirtError {
    /// Map this error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration errors
// ============================================================================

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {path}: {source}")]
    File {
        /// Path that failed to open or read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON
    #[error("invalid JSON in {path}: {message}")]
    Parse {
        /// Origin of the document
        path: PathBuf,
        /// Line where parsing stopped (1-based, 0 when unknown)
        line: usize,
        /// Column where parsing stopped (1-based, 0 when unknown)
        column: usize,
        /// Parser diagnostic, including the location when known
        message: String,
    },

    /// The document does not conform to the configuration schema
    #[error("validation failed for {path}")]
    Schema {
        /// Origin of the document
        path: String,
        /// Every violation found, in document order
        issues: Vec<ValidationIssue>,
    },

    /// A name did not resolve against its registry
    #[error("unknown {kind} '{name}'{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (closest match: '{s}')")))]
    Reference {
        /// Which registry was consulted
        kind: RegistryKind,
        /// The name that failed to resolve
        name: String,
        /// Closest registered name, if any is similar enough
        suggestion: Option<String>,
    },

    /// One or more files failed validation (CLI batch mode)
    #[error("{count} file(s) failed validation")]
    ValidationFailed {
        /// Number of failing files
        count: usize,
    },
}

// ============================================================================
// Validation issues
// ============================================================================

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The document cannot be loaded
    Error,
    /// The document loads, but something deserves attention
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single schema violation, qualified by its location in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON path of the offending value, e.g. `domains.east.cam1`
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
    /// Whether this issue blocks loading
    pub severity: Severity,
}

impl ValidationIssue {
    /// Create an error-severity issue at `path`.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a warning-severity issue at `path`.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{}: {} at {}", self.severity, self.message, self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
    }

    #[test]
    fn config_errors_map_to_config_exit_code() {
        let err = CamvirtError::from(ConfigError::ValidationFailed { count: 2 });
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn io_errors_map_to_io_exit_code() {
        let err = CamvirtError::from(std::io::Error::other("boom"));
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn issue_display_includes_path() {
        let issue = ValidationIssue::error("initialize_timeout", "value 0 is below the minimum of 1");
        assert_eq!(
            issue.to_string(),
            "error: value 0 is below the minimum of 1 at initialize_timeout"
        );
    }

    #[test]
    fn issue_display_omits_empty_path() {
        let issue = ValidationIssue::error("", "expected an object, got an array");
        assert_eq!(issue.to_string(), "error: expected an object, got an array");
    }

    #[test]
    fn reference_error_display_with_suggestion() {
        let err = ConfigError::Reference {
            kind: RegistryKind::Daemon,
            name: "camvrt_daemon".to_string(),
            suggestion: Some("camvirt_daemon".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown daemon 'camvrt_daemon' (closest match: 'camvirt_daemon')"
        );
    }

    #[test]
    fn reference_error_display_without_suggestion() {
        let err = ConfigError::Reference {
            kind: RegistryKind::Machine,
            name: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown machine 'zzz'");
    }

    #[test]
    fn parse_error_display_includes_path_and_message() {
        let err = ConfigError::Parse {
            path: PathBuf::from("config.json"),
            line: 3,
            column: 14,
            message: "expected `,` or `}` at line 3 column 14".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("invalid JSON in config.json:"));
        assert!(rendered.contains("line 3 column 14"));
    }
}
