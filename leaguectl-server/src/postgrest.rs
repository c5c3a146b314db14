//! PostgREST store - the hosted Supabase REST interface
//!
//! Speaks the `/rest/v1/<table>` dialect:
//! - filters as `col=eq.value` / `col=in.("a","b")`
//! - `order=col.desc.nullslast`, `limit=n`
//! - writes with `Prefer: return=representation`
//! - counts via `HEAD` + `Prefer: count=exact`, read from `Content-Range`
//!
//! Error bodies (`{"message": ...}`) become the store error message as-is.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use leaguectl_core::store::{Direction, Filter, Row, Select, Store, StoreError};
use leaguectl_core::Table;

/// Columns the store assigns; never sent on writes
const READ_ONLY: &[&str] = &["id", "created_at"];

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Render a filter value the way PostgREST parses it.
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Double-quoted member of an `in.(...)` list
fn quoted(value: &Value) -> String {
    let raw = literal(value).replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", raw)
}

/// Query-string pairs for a select.
fn query_params(query: &Select) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        match filter {
            Filter::Eq(column, value) => {
                params.push((column.to_string(), format!("eq.{}", literal(value))));
            }
            Filter::In(column, values) => {
                let list: Vec<String> = values.iter().map(quoted).collect();
                params.push((column.to_string(), format!("in.({})", list.join(","))));
            }
        }
    }

    if !query.order.is_empty() {
        let order: Vec<String> = query
            .order
            .iter()
            .map(|o| {
                let direction = match o.direction {
                    Direction::Asc => "asc",
                    Direction::Desc => "desc",
                };
                format!("{}.{}.nullslast", o.column, direction)
            })
            .collect();
        params.push(("order".to_string(), order.join(",")));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

/// Total from `Content-Range: 0-24/3573` or `*/0`.
fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

fn writable(mut row: Row) -> Row {
    for column in READ_ONLY {
        row.remove(*column);
    }
    row
}

fn rows_from(value: Value) -> Result<Vec<Row>, StoreError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(StoreError::new(format!("expected a row object, got {}", other))),
            })
            .collect(),
        other => Err(StoreError::new(format!("expected an array of rows, got {}", other))),
    }
}

/// Store reached over PostgREST
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// `base_url` is the project URL (`https://<project>.supabase.co`);
    /// `api_key` goes out as both `apikey` and bearer token.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| StoreError::new("api key contains invalid header characters"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| StoreError::new("api key contains invalid header characters"))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::new(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, table: Table) -> String {
        format!("{}/{}", self.base_url, table.as_str())
    }

    async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::new(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("{}: {}", status, text.trim()));
        tracing::debug!(%status, %message, "postgrest request failed");
        Err(StoreError::new(message))
    }

    async fn rows(response: Response) -> Result<Vec<Row>, StoreError> {
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::new(e.to_string()))?;
        rows_from(value)
    }

    fn by_id(id: Uuid) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }
}

#[async_trait]
impl Store for RestStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        let request = self.client.get(self.url(query.table)).query(&query_params(query));
        let rows = Self::rows(Self::send(request).await?).await?;
        tracing::debug!(table = %query.table, count = rows.len(), "select");
        Ok(rows)
    }

    async fn count(&self, table: Table) -> Result<u64, StoreError> {
        let request = self
            .client
            .head(self.url(table))
            .query(&[("select", "*")])
            .header("Prefer", "count=exact");
        let response = Self::send(request).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| StoreError::new(format!("no row count returned for {}", table)))
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        let request = self
            .client
            .post(self.url(table))
            .header("Prefer", "return=representation")
            .json(&writable(row));
        Self::rows(Self::send(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::new(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: Table, id: Uuid, row: Row) -> Result<Option<Row>, StoreError> {
        let request = self
            .client
            .patch(self.url(table))
            .query(&Self::by_id(id))
            .header("Prefer", "return=representation")
            .json(&writable(row));
        Ok(Self::rows(Self::send(request).await?).await?.into_iter().next())
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<bool, StoreError> {
        let request = self
            .client
            .delete(self.url(table))
            .query(&Self::by_id(id))
            .header("Prefer", "return=representation");
        Ok(!Self::rows(Self::send(request).await?).await?.is_empty())
    }
}
