//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Request rejected before any file was touched
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Algorithm id not present in the registry
    #[error("Unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// Batch exceeds the configured file-count ceiling
    #[error("Too many files: {count} requested, limit is {limit}")]
    TooManyFiles { count: usize, limit: usize },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    /// Create an invalid request error
    pub fn invalid_request(message: &str) -> Self {
        Self::InvalidRequest {
            message: message.to_string(),
        }
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(algorithm: &str) -> Self {
        Self::UnsupportedAlgorithm {
            algorithm: algorithm.to_string(),
        }
    }

    /// Create a too many files error
    pub fn too_many_files(count: usize, limit: usize) -> Self {
        Self::TooManyFiles { count, limit }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error() {
        let error = ValidationError::invalid_request("No algorithms specified");
        assert!(error.to_string().contains("Invalid request"));
        assert!(error.to_string().contains("No algorithms specified"));
    }

    #[test]
    fn test_unsupported_algorithm_error() {
        let error = ValidationError::unsupported_algorithm("whirlpool");
        assert!(error.to_string().contains("Unsupported algorithm"));
        assert!(error.to_string().contains("whirlpool"));
    }

    #[test]
    fn test_too_many_files_error() {
        let error = ValidationError::too_many_files(6, 5);
        assert!(error.to_string().contains("Too many files"));
        assert!(error.to_string().contains('6'));
        assert!(error.to_string().contains('5'));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = ValidationError::invalid_parameter("chunk_size", "must be positive");
        assert!(error.to_string().contains("Invalid parameter"));
        assert!(error.to_string().contains("chunk_size"));
        assert!(error.to_string().contains("must be positive"));
    }
}
