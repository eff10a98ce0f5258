//! Observability subsystem for chirpy
//!
//! - Structured logging (JSON lines)
//! - Operational counters
//!
//! Observability is read-only: it has no side effects on request handling
//! and never fails the caller.
//!
//! # Usage
//!
//! ```ignore
//! use chirpy::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ChirpCreated, &[("id", "1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_chirps_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields, picking severity from the event kind
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    }
}
