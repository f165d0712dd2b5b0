//! Error types for Schema Porter
//!
//! This module provides unified error handling across the workspace:
//! configuration errors raised while a run is being assembled, and the
//! runtime errors (connection, query, transform, IO) that abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Schema Porter
#[derive(Debug, Error)]
pub enum PorterError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A parameter entry (or the script configuration it points at) is invalid
    #[error("Configuration error in entry {entry}, field '{field}': {message}")]
    Configuration {
        entry: String,
        field: String,
        message: String,
    },

    /// A settings file could not be parsed or rendered
    #[error("Invalid settings: {0}")]
    Settings(String),

    // ========================================================================
    // Runtime Errors
    // ========================================================================
    /// A connection could not be resolved, opened or loaded
    #[error("Connection error: {0}")]
    Connection(String),

    /// A catalog query failed while executing or while streaming rows
    #[error("Query failed for '{label}': {message}")]
    QueryExecution { label: String, message: String },

    /// A row transformer rejected a row
    #[error("Transform failed for '{label}' at row {row}: {message}")]
    Transform {
        label: String,
        row: usize,
        message: String,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl PorterError {
    /// Create a configuration error for an entry field
    pub fn configuration(
        entry: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        PorterError::Configuration {
            entry: entry.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a query execution error
    pub fn query(label: impl Into<String>, msg: impl Into<String>) -> Self {
        PorterError::QueryExecution {
            label: label.into(),
            message: msg.into(),
        }
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        PorterError::Connection(msg.into())
    }

    /// Create a file write error
    pub fn file_write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        PorterError::FileWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        PorterError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PorterError::Configuration { .. } | PorterError::Settings(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PorterError::Io(_)
                | PorterError::FileRead { .. }
                | PorterError::FileWrite { .. }
                | PorterError::DirectoryCreate { .. }
        )
    }

    /// Check if this error can only happen while a run is in progress
    pub fn is_runtime(&self) -> bool {
        self.is_io()
            || matches!(
                self,
                PorterError::Connection(_)
                    | PorterError::QueryExecution { .. }
                    | PorterError::Transform { .. }
            )
    }
}

/// Result type alias using PorterError
pub type PorterResult<T> = Result<T, PorterError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> PorterResult<T>;
}

impl<T, E: Into<PorterError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> PorterResult<T> {
        self.map_err(|e| {
            let err: PorterError = e.into();
            PorterError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configuration_error() {
        let err = PorterError::configuration("#0 (index)", "query", "query can not be empty");
        assert!(err.is_configuration());
        assert!(!err.is_runtime());
        assert_eq!(
            err.to_string(),
            "Configuration error in entry #0 (index), field 'query': query can not be empty"
        );
    }

    #[test]
    fn test_transform_error() {
        let err = PorterError::Transform {
            label: "index".to_string(),
            row: 2,
            message: "column 0 is missing".to_string(),
        };
        assert!(err.is_runtime());
        assert!(!err.is_io());
        assert_eq!(
            err.to_string(),
            "Transform failed for 'index' at row 2: column 0 is missing"
        );
    }

    #[test]
    fn test_query_error() {
        let err = PorterError::query("table", "ORA-00942: table or view does not exist");
        assert!(err.is_runtime());
        assert_eq!(
            err.to_string(),
            "Query failed for 'table': ORA-00942: table or view does not exist"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = PorterError::with_context("Loading snapshot", "Permission denied");
        assert_eq!(err.to_string(), "Loading snapshot: Permission denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PorterError = io_err.into();
        assert!(err.is_io());
        assert!(err.is_runtime());
    }

    #[test]
    fn test_result_ext() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_context("Preparing drop").unwrap_err();
        assert_eq!(err.to_string(), "Preparing drop: IO error: denied");
    }
}
