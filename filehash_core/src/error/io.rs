//! I/O related error types

use thiserror::Error;

/// I/O error with additional context
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Source name associated with the error (if any)
    pub name: Option<String>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// File not found
    FileNotFound,
    /// Permission denied
    PermissionDenied,
    /// File exceeds the configured size ceiling
    FileTooLarge { size: u64, limit: u64 },
    /// Underlying stream failed mid-read
    ReadFailure,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create a file not found error
    pub fn file_not_found(name: &str) -> Self {
        Self {
            kind: IoErrorKind::FileNotFound,
            name: Some(name.to_string()),
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(name: &str, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::PermissionDenied,
            name: Some(name.to_string()),
            source: Some(source),
        }
    }

    /// Create a file too large error
    pub fn file_too_large(name: &str, size: u64, limit: u64) -> Self {
        Self {
            kind: IoErrorKind::FileTooLarge { size, limit },
            name: Some(name.to_string()),
            source: None,
        }
    }

    /// Create a read failure error
    pub fn read_failure(name: &str, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::ReadFailure,
            name: Some(name.to_string()),
            source: Some(source),
        }
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            name: None,
            source: Some(source),
        }
    }

    /// Create an I/O error with a source name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    match (&error.kind, &error.name) {
        (IoErrorKind::FileNotFound, Some(name)) => {
            format!("File not found: {name}")
        }
        (IoErrorKind::FileNotFound, None) => "File not found".to_string(),
        (IoErrorKind::PermissionDenied, Some(name)) => {
            format!("Permission denied for file: {name}")
        }
        (IoErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (IoErrorKind::FileTooLarge { size, limit }, Some(name)) => {
            format!("File too large: {name} is {size} bytes, limit is {limit} bytes")
        }
        (IoErrorKind::FileTooLarge { size, limit }, None) => {
            format!("File too large: {size} bytes, limit is {limit} bytes")
        }
        (IoErrorKind::ReadFailure, Some(name)) => {
            if let Some(source) = &error.source {
                format!("Read failure on {name}: {source}")
            } else {
                format!("Read failure on {name}")
            }
        }
        (IoErrorKind::ReadFailure, None) => "Read failure".to_string(),
        (IoErrorKind::Other, _) => {
            if let Some(source) = &error.source {
                format!("I/O error: {source}")
            } else {
                "I/O error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_not_found_error() {
        let error = IoError::file_not_found("movie.iso");

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert_eq!(error.name, Some("movie.iso".to_string()));
        assert!(error.source.is_none());
        assert!(error.to_string().contains("File not found"));
        assert!(error.to_string().contains("movie.iso"));
    }

    #[test]
    fn test_file_too_large_error() {
        let error = IoError::file_too_large("huge.bin", 2_000_000_000, 1_073_741_824);

        assert!(matches!(error.kind, IoErrorKind::FileTooLarge { .. }));
        assert!(error.to_string().contains("File too large"));
        assert!(error.to_string().contains("huge.bin"));
        assert!(error.to_string().contains("2000000000"));
        assert!(error.to_string().contains("1073741824"));
    }

    #[test]
    fn test_read_failure_error() {
        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "stream truncated");
        let error = IoError::read_failure("upload.dat", io_error);

        assert_eq!(error.kind, IoErrorKind::ReadFailure);
        assert!(error.source.is_some());
        assert!(error.to_string().contains("Read failure"));
        assert!(error.to_string().contains("upload.dat"));
        assert!(error.to_string().contains("stream truncated"));
    }

    #[test]
    fn test_from_std_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "Not found");
        let error = IoError::from_std(io_error);

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert!(error.name.is_none());
        assert!(error.source.is_some());
    }

    #[test]
    fn test_with_name() {
        let io_error = io::Error::other("Generic error");
        let error = IoError::from_std(io_error).with_name("report.pdf");

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.name, Some("report.pdf".to_string()));
    }
}
