//! Chirp request handler
//!
//! Create flow:
//! 1. Decode payload
//! 2. Length check
//! 3. Profanity filter
//! 4. Persist
//!
//! List flow reads the store under its shared lock.
//!
//! The handler is synchronous; the HTTP layer decides where it runs.

use std::sync::Arc;

use super::errors::{ApiError, ApiResult};
use super::request::CreateChirpRequest;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::policy::{validate_length, ProfanityFilter};
use crate::storage::{Chirp, ChirpStore};

/// Orchestrates chirp creation and listing over a shared store.
#[derive(Debug)]
pub struct ChirpHandler {
    store: Arc<ChirpStore>,
    filter: ProfanityFilter,
    metrics: Arc<MetricsRegistry>,
}

impl ChirpHandler {
    pub fn new(
        store: Arc<ChirpStore>,
        filter: ProfanityFilter,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            filter,
            metrics,
        }
    }

    /// Handle a raw create payload and return the stored chirp.
    pub fn create(&self, payload: &[u8]) -> ApiResult<Chirp> {
        let request =
            CreateChirpRequest::decode(payload).map_err(|e| self.record_invalid(e))?;

        self.create_chirp(&request.body)
    }

    /// Reject a payload the transport could not read, e.g. one over the
    /// body size limit. Counted and logged like any undecodable payload.
    pub fn reject_payload(&self, reason: impl Into<String>) -> ApiError {
        self.record_invalid(ApiError::InvalidPayload(reason.into()))
    }

    fn record_invalid(&self, e: ApiError) -> ApiError {
        self.metrics.increment_rejected_invalid();
        log_event_with_fields(Event::ChirpRejected, &[("reason", e.detail().as_str())]);
        e
    }

    /// Validate, filter and persist an already decoded body.
    pub fn create_chirp(&self, body: &str) -> ApiResult<Chirp> {
        if let Err(e) = validate_length(body) {
            self.metrics.increment_rejected_too_long();
            log_event_with_fields(
                Event::ChirpRejected,
                &[("reason", e.to_string().as_str())],
            );
            return Err(ApiError::from(e));
        }

        let cleaned = self.filter.filter(body);

        match self.store.create_chirp(cleaned) {
            Ok(chirp) => {
                self.metrics.increment_chirps_created();
                log_event_with_fields(
                    Event::ChirpCreated,
                    &[("id", chirp.id.to_string().as_str())],
                );
                Ok(chirp)
            }
            Err(e) => {
                self.metrics.increment_persist_failures();
                log_event_with_fields(
                    Event::ChirpPersistFailed,
                    &[("code", e.code().code()), ("reason", e.message())],
                );
                Err(ApiError::SaveFailed(e))
            }
        }
    }

    /// All chirps in ascending id order.
    pub fn list(&self) -> ApiResult<Vec<Chirp>> {
        self.metrics.increment_list_requests();

        let chirps = self.store.list_chirps().map_err(|e| {
            log_event_with_fields(
                Event::StoreReadFailed,
                &[("code", e.code().code()), ("reason", e.message())],
            );
            ApiError::RetrieveFailed(e)
        })?;

        log_event_with_fields(
            Event::ChirpsListed,
            &[("count", chirps.len().to_string().as_str())],
        );
        Ok(chirps)
    }

    pub fn store(&self) -> &ChirpStore {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MAX_CHIRP_LENGTH;
    use tempfile::TempDir;

    fn create_handler(temp_dir: &TempDir) -> ChirpHandler {
        let store = ChirpStore::open(temp_dir.path().join("database.json")).unwrap();
        ChirpHandler::new(
            Arc::new(store),
            ProfanityFilter::default(),
            Arc::new(MetricsRegistry::new()),
        )
    }

    #[test]
    fn test_create_returns_filtered_chirp() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        let chirp = handler
            .create(br#"{"body": "I hate kerfuffle and Sharbert"}"#)
            .unwrap();

        assert_eq!(chirp, Chirp::new(1, "I hate **** and ****"));
        assert_eq!(handler.list().unwrap(), vec![chirp]);
    }

    #[test]
    fn test_clean_body_stored_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        let body = "Plain words, nothing to hide!";
        let chirp = handler.create_chirp(body).unwrap();
        assert_eq!(chirp.body, body);
    }

    #[test]
    fn test_too_long_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        let body = "kerfuffle ".repeat(MAX_CHIRP_LENGTH);
        let err = handler.create_chirp(&body).unwrap_err();

        assert!(matches!(err, ApiError::TooLong(_)));
        assert_eq!(handler.store().count().unwrap(), 0);
        assert_eq!(handler.metrics().snapshot().chirps_rejected_too_long, 1);
    }

    #[test]
    fn test_length_checked_before_filtering() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        // 15 "kerfuffle" tokens: 149 chars raw, 74 chars once masked
        let body = vec!["kerfuffle"; 15].join(" ");
        assert!(body.chars().count() > MAX_CHIRP_LENGTH);

        assert!(handler.create_chirp(&body).is_err());
    }

    #[test]
    fn test_invalid_payload_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        let err = handler.create(br#"{"text": "hello"}"#).unwrap_err();

        assert!(matches!(err, ApiError::InvalidPayload(_)));
        assert_eq!(handler.store().count().unwrap(), 0);
        assert_eq!(handler.metrics().snapshot().chirps_rejected_invalid, 1);
    }

    #[test]
    fn test_rejected_payload_is_counted() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        let err = handler.reject_payload("length limit exceeded");

        assert!(matches!(err, ApiError::InvalidPayload(_)));
        assert_eq!(err.to_string(), "Invalid request payload");
        assert_eq!(handler.metrics().snapshot().chirps_rejected_invalid, 1);
        assert_eq!(handler.store().count().unwrap(), 0);
    }

    #[test]
    fn test_custom_banned_words() {
        let temp_dir = TempDir::new().unwrap();
        let store = ChirpStore::open(temp_dir.path().join("database.json")).unwrap();
        let handler = ChirpHandler::new(
            Arc::new(store),
            ProfanityFilter::new(["heck"]),
            Arc::new(MetricsRegistry::new()),
        );

        let chirp = handler.create_chirp("what the Heck kerfuffle").unwrap();
        assert_eq!(chirp.body, "what the **** kerfuffle");
    }

    #[test]
    fn test_list_counts_requests() {
        let temp_dir = TempDir::new().unwrap();
        let handler = create_handler(&temp_dir);

        handler.create_chirp("one").unwrap();
        handler.create_chirp("two").unwrap();

        let chirps = handler.list().unwrap();
        assert_eq!(chirps.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(handler.metrics().snapshot().list_requests, 1);
        assert_eq!(handler.metrics().snapshot().chirps_created, 2);
    }
}
