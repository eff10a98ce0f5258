//! Chirp storage subsystem
//!
//! Holds the canonical persistent state of all chirps: an in-memory
//! `id -> chirp` mapping mirrored to a single JSON file.
//!
//! # Design Principles
//!
//! - Ids are assigned sequentially and never reused
//! - Chirps are never updated or deleted
//! - Every create rewrites the full file before it is acknowledged
//! - A corrupt or unreadable store file is fatal at startup

mod errors;
mod record;
mod store;

pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use record::Chirp;
pub use store::ChirpStore;
