//! Request decoding

use serde::Deserialize;

use super::errors::{ApiError, ApiResult};

/// Body of a create request: `{"body": "<text>"}`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

impl CreateChirpRequest {
    /// Decode a raw JSON payload.
    pub fn decode(payload: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice(payload).map_err(|e| ApiError::InvalidPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        let request = CreateChirpRequest::decode(br#"{"body": "hello"}"#).unwrap();
        assert_eq!(request.body, "hello");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let request = CreateChirpRequest::decode(br#"{"body": "hi", "user": 3}"#).unwrap();
        assert_eq!(request.body, "hi");
    }

    #[test]
    fn test_decode_missing_field() {
        let err = CreateChirpRequest::decode(br#"{"text": "hello"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(_)));
        assert!(err.detail().contains("body"));
    }

    #[test]
    fn test_decode_wrong_type() {
        assert!(CreateChirpRequest::decode(br#"{"body": 42}"#).is_err());
        assert!(CreateChirpRequest::decode(br#"{"body": null}"#).is_err());
    }

    #[test]
    fn test_decode_not_json() {
        assert!(CreateChirpRequest::decode(b"body=hello").is_err());
        assert!(CreateChirpRequest::decode(b"").is_err());
    }
}
