//! Error types for the file hashing core library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the file hashing core library
///
/// Errors are categorized into three main types:
/// - I/O errors: file and stream access, size-ceiling violations
/// - Validation errors: request validation, raised before any file is touched
/// - Internal errors: library internal errors (absorption guard, assertions)
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether the error is scoped to a single file rather than the whole
    /// request. File-scoped errors are converted into failed results by the
    /// engine; request-scoped errors abort the batch call.
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Internal(_))
    }
}
