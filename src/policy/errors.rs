//! # Content Policy Errors

use thiserror::Error;

/// Result type for policy checks
pub type PolicyResult<T> = Result<T, ValidationError>;

/// Chirp content policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Chirp is too long: {length} characters (max: {max})")]
    TooLong { length: usize, max: usize },
}

impl ValidationError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ValidationError::TooLong { .. } => 400,
        }
    }
}
