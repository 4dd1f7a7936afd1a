//! Error types for binary STL summaries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL summary operations.
pub type StlResult<T> = Result<T, StlError>;

/// Errors that can occur while opening or decoding a binary STL.
#[derive(Debug, Error)]
pub enum StlError {
    /// The path does not end in `.stl` (case-insensitive).
    #[error("not an STL file: {path}")]
    InvalidExtension {
        /// Path that was rejected.
        path: PathBuf,
    },

    /// The file could not be opened for binary reading.
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A read requested more bytes than remain in the source.
    #[error(
        "truncated STL data at byte {position}: a {needed}-byte read failed \
         after {triangles_read} triangles"
    )]
    TruncatedData {
        /// Byte offset at which the short read started.
        position: u64,
        /// Size of the read that failed, in bytes.
        needed: usize,
        /// Triangles fully decoded before the failure.
        triangles_read: usize,
    },

    /// Any other I/O failure while decoding.
    #[error("I/O error while decoding STL: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Coarse classification of an [`StlError`].
///
/// Kept separate from the error itself so a failed reader can be inspected
/// with a cheap, comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StlError::InvalidExtension`].
    InvalidExtension,
    /// See [`StlError::OpenFailed`].
    OpenFailed,
    /// See [`StlError::TruncatedData`].
    TruncatedData,
    /// See [`StlError::ReadFailed`].
    ReadFailed,
}

impl ErrorKind {
    /// Stable numeric code for this kind.
    ///
    /// Codes 1 and 2 match the error codes reported by older tooling for
    /// a bad extension and an unopenable file.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::InvalidExtension => 1,
            Self::OpenFailed => 2,
            Self::TruncatedData => 3,
            Self::ReadFailed => 4,
        }
    }
}

impl StlError {
    /// The [`ErrorKind`] of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtension { .. } => ErrorKind::InvalidExtension,
            Self::OpenFailed { .. } => ErrorKind::OpenFailed,
            Self::TruncatedData { .. } => ErrorKind::TruncatedData,
            Self::ReadFailed(_) => ErrorKind::ReadFailed,
        }
    }

    /// Create an `InvalidExtension` error for the given path.
    #[must_use]
    pub fn invalid_extension(path: impl Into<PathBuf>) -> Self {
        Self::InvalidExtension { path: path.into() }
    }

    /// Attach the number of fully decoded triangles to a truncation error.
    #[must_use]
    pub(crate) fn with_triangles_read(self, count: usize) -> Self {
        match self {
            Self::TruncatedData {
                position, needed, ..
            } => Self::TruncatedData {
                position,
                needed,
                triangles_read: count,
            },
            other => other,
        }
    }
}
