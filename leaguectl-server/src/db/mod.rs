//! PostgreSQL backend - connection pool, schema, and the jsonb row store
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default), created once at startup
//! - Schema owned here: `migrate` creates the six tables idempotently
//! - Rows cross the boundary as `jsonb`, so one store covers every table

pub mod migrations;
pub mod pool;
pub mod store;

pub use pool::{create_pool, create_pool_with_options};
pub use store::PgStore;
