//! # chirpy HTTP Server Module
//!
//! Axum server exposing the chirp API.
//!
//! # Endpoints
//!
//! - `/api/chirps` (and `/messages`) - create and list chirps
//! - `/health` - Health check
//! - `/observability/*` - Health and metrics

pub mod chirp_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
