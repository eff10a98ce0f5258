//! API Layer for chirpy
//!
//! Transport-independent request handling. The HTTP server is a thin
//! adapter over [`ChirpHandler`].
//!
//! # Supported Operations
//!
//! - create: decode, validate length, filter profanity, persist
//! - list: all chirps by ascending id

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult};
pub use handler::ChirpHandler;
pub use request::CreateChirpRequest;
pub use response::ErrorBody;
