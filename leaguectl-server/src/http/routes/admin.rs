//! Admin mutation API under `/admin`
//!
//! Every response is an envelope: `{success, data?, error?}`. The HTTP
//! status mirrors the outcome (200, 400, 404, 500) but the body never
//! changes shape.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{post, put};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use leaguectl_core::{
    DataError, DataResult, Envelope, League, Match, MatchInput, Mutations, News, NewsInput,
    Player, PlayerInput, ShopCategory, ShopCategoryInput, ShopItem, ShopItemInput, Team,
    TeamInput,
};

use crate::http::error::ApiError;
use crate::http::extractors::parse_id;
use crate::http::server::AppState;

/// Envelope plus the status it goes out with
pub struct AdminReply<T>(pub StatusCode, pub Envelope<T>);

impl<T> AdminReply<T> {
    fn rejected(error: ApiError) -> Self {
        Self(error.status(), Envelope::failed(error.message()))
    }
}

impl<T: Serialize> IntoResponse for AdminReply<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

impl<T> From<DataResult<T>> for AdminReply<T> {
    fn from(result: DataResult<T>) -> Self {
        match result {
            Ok(data) => Self(StatusCode::OK, Envelope::ok(data)),
            Err(e) => failure(e),
        }
    }
}

fn failure<T>(e: DataError) -> AdminReply<T> {
    let error = ApiError::from(e);
    if let ApiError::Store(e) = &error {
        tracing::error!(error = %e, "admin mutation failed");
    }
    AdminReply::rejected(error)
}

/// One editable entity kind: its wire input and how it is written.
#[async_trait]
pub trait AdminResource: Send + Sync + 'static {
    const PATH: &'static str;
    type Input: DeserializeOwned + Send + Sync + 'static;
    type Record: Serialize + Send + 'static;

    async fn create(league: &League, input: &Self::Input) -> DataResult<Self::Record>;

    async fn update(league: &League, id: Uuid, input: &Self::Input) -> DataResult<Self::Record>;

    async fn delete(league: &League, id: Uuid) -> DataResult<()>;
}

macro_rules! admin_resource {
    ($marker:ident, $path:literal, $accessor:ident, $input:ty, $record:ty) => {
        pub struct $marker;

        #[async_trait]
        impl AdminResource for $marker {
            const PATH: &'static str = $path;
            type Input = $input;
            type Record = $record;

            async fn create(league: &League, input: &$input) -> DataResult<$record> {
                league.$accessor().create(input).await
            }

            async fn update(league: &League, id: Uuid, input: &$input) -> DataResult<$record> {
                league.$accessor().update(id, input).await
            }

            async fn delete(league: &League, id: Uuid) -> DataResult<()> {
                league.$accessor().delete(id).await
            }
        }
    };
}

admin_resource!(Teams, "/admin/teams", teams, TeamInput, Team);
admin_resource!(Players, "/admin/players", players, PlayerInput, Player);
admin_resource!(Matches, "/admin/matches", matches, MatchInput, Match);
admin_resource!(Articles, "/admin/news", news, NewsInput, News);
admin_resource!(ShopItems, "/admin/shop/items", shop_items, ShopItemInput, ShopItem);
admin_resource!(
    ShopCategories,
    "/admin/shop/categories",
    shop_categories,
    ShopCategoryInput,
    ShopCategory
);

fn body<I>(payload: Result<Json<I>, JsonRejection>) -> Result<I, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// POST /admin/<resource>
async fn create<R: AdminResource>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> AdminReply<R::Record> {
    let input = match body(payload) {
        Ok(input) => input,
        Err(e) => return AdminReply::rejected(e),
    };
    let result = R::create(&state.league, &input).await;
    if result.is_ok() {
        tracing::info!(path = R::PATH, "created");
    }
    result.into()
}

/// PUT /admin/<resource>/{id}
async fn update<R: AdminResource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> AdminReply<R::Record> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return AdminReply::rejected(e.into()),
    };
    let input = match body(payload) {
        Ok(input) => input,
        Err(e) => return AdminReply::rejected(e),
    };
    let result = R::update(&state.league, id, &input).await;
    if result.is_ok() {
        tracing::info!(path = R::PATH, %id, "updated");
    }
    result.into()
}

/// DELETE /admin/<resource>/{id}
async fn remove<R: AdminResource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AdminReply<()> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return AdminReply::rejected(e.into()),
    };
    match R::delete(&state.league, id).await {
        Ok(()) => {
            tracing::info!(path = R::PATH, %id, "deleted");
            AdminReply(StatusCode::OK, Envelope::done())
        }
        Err(e) => failure(e),
    }
}

fn resource<R: AdminResource>() -> Router<Arc<AppState>> {
    Router::new()
        .route(R::PATH, post(create::<R>))
        .route(
            &format!("{}/{{id}}", R::PATH),
            put(update::<R>).delete(remove::<R>),
        )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(resource::<Teams>())
        .merge(resource::<Players>())
        .merge(resource::<Matches>())
        .merge(resource::<Articles>())
        .merge(resource::<ShopItems>())
        .merge(resource::<ShopCategories>())
}
