//! Store query interface
//!
//! The relational store is opaque: it is reached through table-level reads
//! (equality / membership filters, ordering, limit) and id-keyed writes.
//! Rows travel as JSON objects so one interface covers every table; the
//! entity layer converts them with serde.
//!
//! Implementations:
//! - [`MemoryStore`]: in-process tables, used by tests and the `memory` backend
//! - `PgStore` / `RestStore` in `leaguectl-server`

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::Table;

pub use memory::MemoryStore;

/// One stored row: column name to JSON value
pub type Row = Map<String, Value>;

/// Opaque store failure carrying the backend's raw message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Row filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(&'static str, Value),
    /// `column IN (values)`
    In(&'static str, Vec<Value>),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering clause; nulls always sort last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

/// Table read
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: Table,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<u32>,
}

impl Select {
    pub fn from(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    pub fn is_in<V: Into<Value>>(
        mut self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filters.push(Filter::In(
            column,
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn by_id(self, id: Uuid) -> Self {
        self.eq("id", id.to_string())
    }

    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order.push(Order { column, direction });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Handle to the backing relational store.
///
/// Constructed once at startup and shared read-only; every call is an
/// independent round trip with no transaction spanning calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError>;

    async fn count(&self, table: Table) -> Result<u64, StoreError>;

    /// Insert a row; the store assigns `id` and `created_at`.
    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError>;

    /// Overwrite the given columns of row `id`. `None` when no such row.
    async fn update(&self, table: Table, id: Uuid, row: Row) -> Result<Option<Row>, StoreError>;

    /// Hard delete. `false` when no such row.
    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, StoreError>;
}
