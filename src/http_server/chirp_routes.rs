//! Chirp HTTP Routes
//!
//! - `POST /api/chirps` - create a chirp (201)
//! - `GET /api/chirps` - list all chirps (200)
//! - any other method, `HEAD` included - 405, plain text
//!
//! The same routes are also mounted at `/messages`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};

use crate::api::{ApiError, ChirpHandler};
use crate::storage::Chirp;

/// Largest create payload read from the wire. A valid chirp is far smaller.
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Create chirp routes
pub fn chirp_routes(handler: Arc<ChirpHandler>) -> Router {
    Router::new()
        .route("/api/chirps", chirps_method_router())
        .route("/messages", chirps_method_router())
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .with_state(handler)
}

fn chirps_method_router() -> MethodRouter<Arc<ChirpHandler>> {
    // axum answers HEAD with the GET handler unless HEAD has its own
    get(list_chirps_handler)
        .head(method_not_allowed_handler)
        .post(create_chirp_handler)
        .fallback(method_not_allowed_handler)
}

// ==================
// Handlers
// ==================

/// The body is taken as raw bytes so that every decode failure, including
/// a missing or wrong content type or an oversized body, yields the same 400
/// response.
async fn create_chirp_handler(
    State(handler): State<Arc<ChirpHandler>>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    let payload = payload.map_err(|rejection| handler.reject_payload(rejection.body_text()))?;

    // Store writes block on fsync; keep them off the async workers
    let chirp = tokio::task::spawn_blocking(move || handler.create(&payload))
        .await
        .map_err(|e| ApiError::SaveInterrupted(e.to_string()))??;

    Ok((StatusCode::CREATED, Json(chirp)))
}

async fn list_chirps_handler(
    State(handler): State<Arc<ChirpHandler>>,
) -> Result<Json<Vec<Chirp>>, ApiError> {
    // A list waits on the store lock while a create fsyncs
    let chirps = tokio::task::spawn_blocking(move || handler.list())
        .await
        .map_err(|e| ApiError::RetrieveInterrupted(e.to_string()))??;

    Ok(Json(chirps))
}

async fn method_not_allowed_handler() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
