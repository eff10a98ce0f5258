//! Chirp content policy
//!
//! Applied to every chirp before it is stored:
//! 1. Length check (at most 140 characters)
//! 2. Profanity filtering (banned tokens replaced with `****`)

mod errors;
mod length;
mod profanity;

pub use errors::{PolicyResult, ValidationError};
pub use length::{validate_length, MAX_CHIRP_LENGTH};
pub use profanity::{ProfanityFilter, DEFAULT_BANNED_WORDS, MASK};
