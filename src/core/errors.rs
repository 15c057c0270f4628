//! Error types for the pdf-index library.
//!
//! Fatal setup problems (missing inputs, unreadable configuration, broken
//! templates) surface as [`IndexError`]. Per-file problems never do: the
//! pipeline logs them and degrades the affected field instead.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io::reports::ReportError;

/// Main result type for pdf-index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Error type for all pdf-index operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O related errors (reading inputs, writing the page)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A required input (configuration, template, output directory) is absent
    #[error("{kind} not found: {}", path.display())]
    MissingInput {
        /// What kind of input is missing
        kind: &'static str,
        /// Where it was expected
        path: PathBuf,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Template registration or rendering failed
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
    },
}

impl IndexError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a missing-input error
    pub fn missing(kind: &'static str, path: impl AsRef<Path>) -> Self {
        Self::MissingInput {
            kind,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error means a required input was absent.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

impl From<serde_yaml::Error> for IndexError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}
