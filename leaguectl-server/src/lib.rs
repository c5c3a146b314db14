//! leaguectl-server: store backends and the HTTP surface
//!
//! - `db`: PostgreSQL pool, schema migrations and the jsonb row store
//! - `postgrest`: the hosted PostgREST/Supabase row store
//! - `backend`: picks one of the above (or memory) from configuration
//! - `http`: axum router with `/get-news`, `/api` reads and `/admin` mutations

pub mod backend;
pub mod db;
pub mod http;
pub mod postgrest;

pub use backend::{open_store, BackendError};
pub use db::PgStore;
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use postgrest::RestStore;
