//! In-process store
//!
//! Tables are vectors of JSON rows behind a single `RwLock`. Besides backing
//! the `memory` backend, it counts every call and can be told to fail per
//! table, which is how tests observe "no store call was issued" and the
//! stats degradation path.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Direction, Filter, Order, Row, Select, Store, StoreError};
use crate::models::Table;

#[derive(Default)]
struct Tables {
    rows: HashMap<Table, Vec<Row>>,
    last_created: Option<DateTime<Utc>>,
}

impl Tables {
    /// Creation timestamps are strictly increasing, even within one clock tick.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(stamp);
        stamp
    }
}

/// Store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failures: RwLock<HashMap<Table, String>>,
    calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls issued so far (reads and writes).
    pub fn calls(&self) -> u64 {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Make every call touching `table` fail with `message`.
    pub async fn fail(&self, table: Table, message: impl Into<String>) {
        self.failures.write().await.insert(table, message.into());
    }

    /// Undo [`MemoryStore::fail`].
    pub async fn recover(&self, table: Table) {
        self.failures.write().await.remove(&table);
    }

    async fn enter(&self, table: Table) -> Result<(), StoreError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        match self.failures.read().await.get(&table) {
            Some(message) => Err(StoreError::new(message.clone())),
            None => Ok(()),
        }
    }
}

fn id_matches(row: &Row, id: Uuid) -> bool {
    matches!(row.get("id"), Some(Value::String(s)) if *s == id.to_string())
}

fn column<'a>(row: &'a Row, name: &str) -> &'a Value {
    row.get(name).unwrap_or(&Value::Null)
}

fn matches_filter(row: &Row, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(name, value) => column(row, name) == value,
        Filter::In(name, values) => values.contains(column(row, name)),
    }
}

/// Compare two non-null values. RFC 3339 strings compare as instants.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_rows(a: &Row, b: &Row, order: &[Order]) -> Ordering {
    for clause in order {
        let (x, y) = (column(a, clause.column), column(b, clause.column));
        let ordering = match (x.is_null(), y.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = compare_values(x, y);
                match clause.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        self.enter(query.table).await?;
        let tables = self.tables.read().await;

        let mut rows: Vec<Row> = tables
            .rows
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches_filter(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| compare_rows(a, b, &query.order));
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn count(&self, table: Table) -> Result<u64, StoreError> {
        self.enter(table).await?;
        let tables = self.tables.read().await;
        Ok(tables.rows.get(&table).map_or(0, |rows| rows.len() as u64))
    }

    async fn insert(&self, table: Table, mut row: Row) -> Result<Row, StoreError> {
        self.enter(table).await?;
        let mut tables = self.tables.write().await;

        let created_at = tables.next_created_at();
        row.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        row.insert(
            "created_at".into(),
            serde_json::to_value(created_at).map_err(|e| StoreError::new(e.to_string()))?,
        );

        tables.rows.entry(table).or_default().push(row.clone());
        tracing::debug!(%table, "memory store insert");
        Ok(row)
    }

    async fn update(&self, table: Table, id: Uuid, row: Row) -> Result<Option<Row>, StoreError> {
        self.enter(table).await?;
        let mut tables = self.tables.write().await;

        let Some(existing) = tables
            .rows
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|r| id_matches(r, id)))
        else {
            return Ok(None);
        };

        for (name, value) in row {
            if name != "id" && name != "created_at" {
                existing.insert(name, value);
            }
        }
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, StoreError> {
        self.enter(table).await?;
        let mut tables = self.tables.write().await;

        let Some(rows) = tables.rows.get_mut(&table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| !id_matches(r, id));
        Ok(rows.len() < before)
    }
}
