//! Public news endpoint
//!
//! `GET /get-news?featured=true&limit=n` serves published articles, newest
//! first, to any origin. Every failure is a 400 with `{"error": message}`.
//! `OPTIONS /get-news` answers 200 with an empty body and never reaches the
//! store.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use leaguectl_core::NewsFilter;

use crate::http::server::AppState;

/// Request headers browsers may send cross-origin
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Raw query parameters, parsed leniently the way the endpoint always has.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub featured: Option<String>,
    pub limit: Option<String>,
}

impl NewsParams {
    /// `featured` counts only when it is exactly `true`. An empty `limit`
    /// is ignored; anything else must be a non-negative integer.
    pub fn filter(&self) -> Result<NewsFilter, String> {
        let featured = self.featured.as_deref() == Some("true");
        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| format!("invalid limit: '{}'", raw))?,
            ),
        };
        Ok(NewsFilter { featured, limit })
    }
}

fn bad_request(message: impl ToString) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)],
        Json(json!({ "error": message.to_string() })),
    )
        .into_response()
}

/// GET /get-news
async fn get_news(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Response {
    let filter = match params {
        Ok(Query(params)) => match params.filter() {
            Ok(filter) => filter,
            Err(message) => return bad_request(message),
        },
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match state.league.news().list(filter).await {
        Ok(news) => {
            tracing::debug!(count = news.len(), featured = filter.featured, "get-news");
            (
                [(ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)],
                Json(news),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "get-news failed");
            bad_request(e)
        }
    }
}

/// Answers every `OPTIONS /get-news` itself (200, empty body) and stamps
/// `Access-Control-Allow-Origin: *` on the rest.
fn open_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get-news", get(get_news))
        .layer(open_cors())
}
