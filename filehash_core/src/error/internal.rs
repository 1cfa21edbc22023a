//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Digest absorption error
    #[error("Digest absorption failed for algorithm '{algorithm}': {message}")]
    AbsorptionFailure { algorithm: String, message: String },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create a digest absorption error
    pub fn absorption_failure(algorithm: &str, message: &str) -> Self {
        Self::AbsorptionFailure {
            algorithm: algorithm.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an internal assertion failure error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorption_failure_error() {
        let error = InternalError::absorption_failure("sha256", "accumulator panicked");
        assert!(error.to_string().contains("Digest absorption failed"));
        assert!(error.to_string().contains("sha256"));
        assert!(error.to_string().contains("accumulator panicked"));
    }

    #[test]
    fn test_assertion_error() {
        let error = InternalError::assertion("accumulator finalized twice");
        assert!(error.to_string().contains("Internal assertion failed"));
        assert!(error.to_string().contains("finalized twice"));
    }
}
