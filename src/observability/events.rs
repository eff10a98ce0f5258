//! Observable events
//!
//! Every log line carries one of these event names.

use std::fmt;

/// Observable events in chirpy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved
    ConfigLoaded,
    /// Chirp store loaded from disk
    StoreLoaded,
    /// Chirp store could not be opened (FATAL)
    StoreInitFailed,
    /// HTTP listener bound, ready for requests
    Serving,
    /// Server stopped
    ShutdownComplete,

    // Requests
    /// Chirp persisted
    ChirpCreated,
    /// Chirp refused (bad payload or policy)
    ChirpRejected,
    /// Chirp could not be persisted
    ChirpPersistFailed,
    /// Chirps listed
    ChirpsListed,
    /// Chirp store could not be read
    StoreReadFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CHIRPY_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreInitFailed => "STORE_INIT_FAILED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ChirpCreated => "CHIRP_CREATED",
            Event::ChirpRejected => "CHIRP_REJECTED",
            Event::ChirpPersistFailed => "CHIRP_PERSIST_FAILED",
            Event::ChirpsListed => "CHIRPS_LISTED",
            Event::StoreReadFailed => "STORE_READ_FAILED",
        }
    }

    /// Returns whether this event means the process cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StoreInitFailed)
    }

    /// Returns whether this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::StoreInitFailed | Event::ChirpPersistFailed | Event::StoreReadFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
