//! HTTP server layer
//!
//! Axum server with:
//! - `GET /get-news`, the public news endpoint
//! - Public reads under `/api`, admin mutations under `/admin`
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
