//! Error types and context management for designer operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all designer operations
#[derive(Debug)]
pub enum DesignerError {
    /// User-supplied input was rejected
    ///
    /// Covers blank pattern names and malformed hex color values. The
    /// operation is aborted with no state change.
    InvalidInput {
        /// Name of the rejected field
        field: &'static str,
        /// Explanation of why the input was rejected
        reason: String,
    },

    /// Operation referenced something that does not exist
    ///
    /// Occurs for:
    /// - Unknown pattern ids
    /// - Cell coordinates outside the grid
    /// - Color names missing from the palette
    NotFound {
        /// Description of the missing item
        what: String,
    },

    /// Exact per-color balance cannot be reached for these dimensions
    Unbalanceable {
        /// Total number of cells in the grid
        cells: usize,
        /// Number of colors in the palette
        palette_size: usize,
        /// Required per-color count
        target: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Persisting, reading back or removing a pattern failed
    Storage {
        /// Storage key of the pattern involved
        key: String,
        /// Description of the storage operation that failed
        operation: &'static str,
        /// Underlying failure
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for DesignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{field}': {reason}")
            }
            Self::NotFound { what } => write!(f, "Not found: {what}"),
            Self::Unbalanceable {
                cells,
                palette_size,
                target,
            } => {
                write!(
                    f,
                    "Cannot balance {cells} cells to {target} per color across {palette_size} colors \
                     ({} cells required)",
                    palette_size * target
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Storage {
                key,
                operation,
                source,
            } => {
                write!(f, "Storage error during {operation} of '{key}': {source}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DesignerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source.as_ref()),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for designer results
pub type Result<T> = std::result::Result<T, DesignerError>;

impl From<std::io::Error> for DesignerError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for DesignerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            key: String::from("<unknown>"),
            operation: "serialization",
            source: Box::new(err),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DesignerError {
    DesignerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid input error
pub fn invalid_input(field: &'static str, reason: &impl ToString) -> DesignerError {
    DesignerError::InvalidInput {
        field,
        reason: reason.to_string(),
    }
}

/// Create a not found error
pub fn not_found(what: &impl ToString) -> DesignerError {
    DesignerError::NotFound {
        what: what.to_string(),
    }
}

/// Create a storage error for the given key
pub fn storage_error(
    key: &str,
    operation: &'static str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> DesignerError {
    DesignerError::Storage {
        key: key.to_string(),
        operation,
        source: source.into(),
    }
}
