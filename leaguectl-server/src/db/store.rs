//! PostgreSQL store
//!
//! One implementation for every table: rows leave Postgres as
//! `to_jsonb(t)` and enter through `jsonb_populate_record`, so column
//! types (uuid, timestamptz, numeric) are converted by the database, not
//! here. Filters and ordering use the typed columns.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use leaguectl_core::store::{Direction, Filter, Row, Select, Store, StoreError};
use leaguectl_core::Table;

/// Column names are interpolated into SQL, so they must be plain identifiers.
static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("identifier pattern is valid"));

/// Store-assigned, never written by callers
const READ_ONLY: &[&str] = &["id", "created_at"];

fn ident(name: &str) -> Result<&str, StoreError> {
    if IDENT.is_match(name) {
        Ok(name)
    } else {
        Err(StoreError::new(format!("invalid column name: {:?}", name)))
    }
}

/// Keep the database's own message; it is what the admin sees.
fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(db) => StoreError::new(db.message()),
        other => StoreError::new(other.to_string()),
    }
}

/// Writable columns of `row`, validated
fn columns(row: &Row) -> Result<Vec<&str>, StoreError> {
    row.keys()
        .map(String::as_str)
        .filter(|c| !READ_ONLY.contains(c))
        .map(ident)
        .collect()
}

/// Jsonb expression `value` converted to the type of `table.column`
fn typed(table: &str, column: &str, value: &str) -> String {
    format!(
        r#"(jsonb_populate_record(NULL::{table}, jsonb_build_object('{column}', {value})))."{column}""#,
        table = table,
        column = column,
        value = value,
    )
}

/// Build `SELECT` SQL plus its jsonb bind values.
fn select_sql(query: &Select) -> Result<(String, Vec<Value>), StoreError> {
    let table = query.table.as_str();
    let mut sql = format!("SELECT to_jsonb(t) FROM {} t", table);
    let mut binds = Vec::new();

    for (i, filter) in query.filters.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        match filter {
            Filter::Eq(column, value) => {
                let column = ident(column)?;
                binds.push(value.clone());
                let param = format!("${}::jsonb", binds.len());
                sql.push_str(&format!("t.\"{}\" = {}", column, typed(table, column, &param)));
            }
            Filter::In(column, values) => {
                let column = ident(column)?;
                binds.push(Value::Array(values.clone()));
                sql.push_str(&format!(
                    "t.\"{}\" IN (SELECT {} FROM jsonb_array_elements(${}) AS e(v))",
                    column,
                    typed(table, column, "e.v"),
                    binds.len()
                ));
            }
        }
    }

    if !query.order.is_empty() {
        let clauses = query
            .order
            .iter()
            .map(|o| {
                let direction = match o.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                Ok(format!("t.\"{}\" {} NULLS LAST", ident(o.column)?, direction))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&clauses.join(", "));
    }

    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    Ok((sql, binds))
}

/// `"a", "b"` - quoted so keyword-like names (`position`, `round`) stay columns
fn column_list(cols: &[&str]) -> String {
    cols.iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_sql(table: Table, cols: &[&str]) -> String {
    let list = column_list(cols);
    format!(
        "INSERT INTO {table} AS t ({list}) \
         SELECT {list} FROM jsonb_populate_record(NULL::{table}, $1) \
         RETURNING to_jsonb(t)",
        table = table.as_str(),
        list = list,
    )
}

fn update_sql(table: Table, cols: &[&str]) -> String {
    let list = column_list(cols);
    format!(
        "UPDATE {table} AS t SET ({list}) = \
         (SELECT {list} FROM jsonb_populate_record(NULL::{table}, $1)) \
         WHERE t.id = $2 RETURNING to_jsonb(t)",
        table = table.as_str(),
        list = list,
    )
}

fn into_row(value: Value) -> Result<Row, StoreError> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(StoreError::new(format!("expected a row object, got {}", other))),
    }
}

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        let (sql, binds) = select_sql(query)?;
        let mut statement = sqlx::query_scalar::<_, Value>(&sql);
        for value in binds {
            statement = statement.bind(value);
        }

        let rows = statement.fetch_all(&self.pool).await.map_err(store_error)?;
        tracing::debug!(table = %query.table, count = rows.len(), "select");
        rows.into_iter().map(into_row).collect()
    }

    async fn count(&self, table: Table) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        let cols = columns(&row)?;
        if cols.is_empty() {
            return Err(StoreError::new(format!("empty row for {}", table)));
        }
        let sql = insert_sql(table, &cols);

        let created: Value = sqlx::query_scalar(&sql)
            .bind(Value::Object(row))
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        into_row(created)
    }

    async fn update(&self, table: Table, id: Uuid, row: Row) -> Result<Option<Row>, StoreError> {
        let cols = columns(&row)?;
        if cols.is_empty() {
            let existing = self.select(&Select::from(table).by_id(id).limit(1)).await?;
            return Ok(existing.into_iter().next());
        }

        let updated: Option<Value> = sqlx::query_scalar(&update_sql(table, &cols))
            .bind(Value::Object(row))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        updated.map(into_row).transpose()
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table.as_str());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_sql_with_filters_order_and_limit() {
        let query = Select::from(Table::News)
            .eq("published", true)
            .eq("is_featured", true)
            .order_by("created_at", Direction::Desc)
            .limit(2);

        let (sql, binds) = select_sql(&query).unwrap();
        assert_eq!(
            sql,
            r#"SELECT to_jsonb(t) FROM news t WHERE t."published" = (jsonb_populate_record(NULL::news, jsonb_build_object('published', $1::jsonb)))."published" AND t."is_featured" = (jsonb_populate_record(NULL::news, jsonb_build_object('is_featured', $2::jsonb)))."is_featured" ORDER BY t."created_at" DESC NULLS LAST LIMIT 2"#
        );
        assert!(!sql.contains("to_jsonb(t) ->"));
        assert_eq!(binds, vec![json!(true), json!(true)]);
    }

    #[test]
    fn membership_binds_one_array() {
        let query = Select::from(Table::Teams).is_in("id", ["a", "b"]);
        let (sql, binds) = select_sql(&query).unwrap();
        assert!(sql.ends_with(
            r#"WHERE t."id" IN (SELECT (jsonb_populate_record(NULL::teams, jsonb_build_object('id', e.v)))."id" FROM jsonb_array_elements($1) AS e(v))"#
        ));
        assert_eq!(binds, vec![json!(["a", "b"])]);
    }

    #[test]
    fn lookup_by_id_compares_the_uuid_column() {
        let id = Uuid::new_v4();
        let (sql, binds) = select_sql(&Select::from(Table::Teams).by_id(id)).unwrap();
        assert!(sql.starts_with(r#"SELECT to_jsonb(t) FROM teams t WHERE t."id" = "#));
        assert_eq!(binds, vec![json!(id.to_string())]);
    }

    #[test]
    fn write_sql_skips_store_assigned_columns() {
        let mut row = Row::new();
        row.insert("id".into(), json!("ignored"));
        row.insert("name".into(), json!("FC Nouadhibou"));
        row.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
        let cols = columns(&row).unwrap();
        assert_eq!(cols, ["name"]);

        assert_eq!(
            insert_sql(Table::Teams, &cols),
            r#"INSERT INTO teams AS t ("name") SELECT "name" FROM jsonb_populate_record(NULL::teams, $1) RETURNING to_jsonb(t)"#
        );
        assert!(update_sql(Table::Teams, &cols).ends_with("WHERE t.id = $2 RETURNING to_jsonb(t)"));
    }

    #[test]
    fn hostile_column_names_rejected() {
        let mut row = Row::new();
        row.insert("name; DROP TABLE teams".into(), json!("x"));
        assert!(columns(&row).is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn round_trip_against_postgres() {
        use leaguectl_core::models::TeamInput;
        use leaguectl_core::{League, Mutations};
        use std::sync::Arc;

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");

        let league = League::new(Arc::new(PgStore::new(pool)));
        let team = league
            .teams()
            .create(&TeamInput::named("Round Trip FC"))
            .await
            .expect("create failed");
        assert_eq!(league.teams().get(team.id).await.expect("get failed"), team);
        league.teams().delete(team.id).await.expect("delete failed");
    }
}
