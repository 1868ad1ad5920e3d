//! Error types and path context for grid operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::grid::coordinate::GridCoordinate;

/// Placeholder path used for errors raised while decoding in-memory bytes
pub const IN_MEMORY_PATH: &str = "<memory>";

/// Main error type for all grid operations
#[derive(Debug)]
pub enum GridError {
    /// Coordinate lies outside the grid extent
    OutOfBounds {
        /// The offending coordinate
        coordinate: GridCoordinate,
        /// Grid width at the time of the call
        width: u32,
        /// Grid height at the time of the call
        height: u32,
    },

    /// Mutating call while the generator is disabled
    NotInitialized {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Map file does not exist
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Read or write failure on the filesystem
    Io {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Map file is structurally invalid
    ///
    /// Covers bad magic, truncation, checksum mismatch, element count
    /// mismatch and records that violate grid invariants.
    Format {
        /// Path of the offending file
        path: PathBuf,
        /// Description of what is malformed
        reason: String,
    },

    /// Map file was written by a newer format revision
    UnsupportedVersion {
        /// Path of the offending file
        path: PathBuf,
        /// Version tag found in the file
        found: u32,
        /// Highest version this reader understands
        supported: u32,
    },

    /// Every element identifier has been handed out
    IdentifiersExhausted {
        /// Last identifier issued or loaded
        last: u64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coordinate,
                width,
                height,
            } => {
                write!(
                    f,
                    "Coordinate {coordinate} is out of bounds for a {width}x{height} grid"
                )
            }
            Self::NotInitialized { operation } => {
                write!(
                    f,
                    "Cannot {operation}: generator is not initialized in editor mode"
                )
            }
            Self::FileNotFound { path } => {
                write!(f, "Map file '{}' does not exist", path.display())
            }
            Self::Io {
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
            Self::Format { path, reason } => {
                write!(f, "Malformed map file '{}': {reason}", path.display())
            }
            Self::UnsupportedVersion {
                path,
                found,
                supported,
            } => {
                write!(
                    f,
                    "Map file '{}' has format version {found}, newer than supported version {supported}",
                    path.display()
                )
            }
            Self::IdentifiersExhausted { last } => {
                write!(f, "No element identifiers remain after {last}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Attaches the offending file path to errors produced from in-memory data
pub trait WithPath<T> {
    /// Replace the placeholder path of path-carrying errors with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<GridError>,
{
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                GridError::FileNotFound { path: p }
                | GridError::Io { path: p, .. }
                | GridError::Format { path: p, .. }
                | GridError::UnsupportedVersion { path: p, .. } => {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a format error for in-memory data, to be located with [`WithPath`]
pub fn format_error(reason: &impl ToString) -> GridError {
    GridError::Format {
        path: PathBuf::from(IN_MEMORY_PATH),
        reason: reason.to_string(),
    }
}

/// Create a filesystem error for `operation` on `path`
pub fn io_error(path: &Path, operation: &'static str, source: std::io::Error) -> GridError {
    GridError::Io {
        path: path.to_path_buf(),
        operation,
        source,
    }
}
