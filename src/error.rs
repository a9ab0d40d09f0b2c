//! Structured error types for configuration loading and external tools.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors raised while loading or interpreting configuration.
///
/// Missing or unreadable files are never reported here; they are skipped
/// during discovery. Only structural problems in a file that was read, and
/// values that cannot be interpreted, surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}:{line}: section header is malformed: {content:?}", path.display())]
    MalformedSectionHeader {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: key defined before any section header: {content:?}", path.display())]
    MissingSectionHeader {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: expected 'key = value': {content:?}", path.display())]
    MissingDelimiter {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: section [{section}] already defined in this file", path.display())]
    DuplicateSection {
        path: PathBuf,
        line: usize,
        section: String,
    },

    #[error("{}:{line}: key {key:?} already defined in section [{section}]", path.display())]
    DuplicateKey {
        path: PathBuf,
        line: usize,
        section: String,
        key: String,
    },

    #[error("{}:{line}: invalid pattern [{pattern}]: {source}", path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid value for {key:?}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// The configuration file the error was found in, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigError::MalformedSectionHeader { path, .. }
            | ConfigError::MissingSectionHeader { path, .. }
            | ConfigError::MissingDelimiter { path, .. }
            | ConfigError::DuplicateSection { path, .. }
            | ConfigError::DuplicateKey { path, .. }
            | ConfigError::InvalidPattern { path, .. } => Some(path),
            ConfigError::InvalidValue { .. } => None,
        }
    }

    pub fn invalid_value(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while running `awk` or `date`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{name}: command not found")]
    NotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("{name}: failed to start: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}: {status}")]
    Failed { name: String, status: ExitStatus },

    #[error("{name}: output is not valid UTF-8")]
    InvalidOutput { name: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for external tool invocations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;
