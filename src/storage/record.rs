//! Chirp record and on-disk store layout
//!
//! The backing file is a single JSON document:
//!
//! ```json
//! {"chirps": {"1": {"id": 1, "body": "hello"}}}
//! ```
//!
//! Map keys are the stringified chirp ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single stored chirp. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
}

impl Chirp {
    pub fn new(id: u64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// Owned form of the backing file, used when loading.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoreFile {
    #[serde(default)]
    pub chirps: BTreeMap<u64, Chirp>,
}

/// Borrowed form of the backing file, used when persisting.
#[derive(Debug, Serialize)]
pub(crate) struct StoreFileRef<'a> {
    pub chirps: &'a BTreeMap<u64, Chirp>,
}

impl StoreFile {
    /// Checks that every key is a positive id matching its record.
    ///
    /// Returns a description of the first inconsistency found.
    pub fn check_consistency(&self) -> Result<(), String> {
        for (key, chirp) in &self.chirps {
            if *key == 0 {
                return Err("chirp id 0 is not a valid id".to_string());
            }
            if chirp.id != *key {
                return Err(format!(
                    "chirp stored under key {} carries id {}",
                    key, chirp.id
                ));
            }
        }
        Ok(())
    }
}
