//! Chirp length limit

use super::errors::{PolicyResult, ValidationError};

/// Maximum chirp length, in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Rejects bodies longer than [`MAX_CHIRP_LENGTH`] characters.
///
/// Length is counted in `char`s so multi-byte text is not penalized.
/// Empty bodies are accepted.
pub fn validate_length(body: &str) -> PolicyResult<()> {
    let length = body.chars().count();
    if length > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_CHIRP_LENGTH,
        });
    }
    Ok(())
}
