//! Public read API under `/api`

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use leaguectl_core::{MatchView, News, Player, PlayerView, ShopCategory, ShopItemView, Stats, Team};

use super::news::NewsParams;
use crate::http::error::ApiError;
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Team>> {
    Ok(Json(state.league.teams().list().await?))
}

async fn get_team(State(state): State<Arc<AppState>>, ValidUuid(id): ValidUuid) -> ApiResult<Team> {
    Ok(Json(state.league.teams().get(id).await?))
}

async fn team_players(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> ApiResult<Vec<Player>> {
    Ok(Json(state.league.teams().players(id).await?))
}

async fn list_players(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PlayerView>> {
    Ok(Json(state.league.players().list().await?))
}

async fn get_player(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> ApiResult<PlayerView> {
    Ok(Json(state.league.players().get(id).await?))
}

async fn list_matches(State(state): State<Arc<AppState>>) -> ApiResult<Vec<MatchView>> {
    Ok(Json(state.league.matches().list().await?))
}

async fn get_match(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> ApiResult<MatchView> {
    Ok(Json(state.league.matches().get(id).await?))
}

/// GET /api/news?featured=&limit=
async fn list_news(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> ApiResult<Vec<News>> {
    let Query(params) = params.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let filter = params.filter().map_err(ApiError::bad_request)?;
    Ok(Json(state.league.news().list(filter).await?))
}

async fn featured_news(State(state): State<Arc<AppState>>) -> ApiResult<Vec<News>> {
    Ok(Json(state.league.news().featured().await?))
}

async fn get_news_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> ApiResult<News> {
    Ok(Json(state.league.news().get_published(id).await?))
}

async fn list_items(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ShopItemView>> {
    Ok(Json(state.league.shop_items().list().await?))
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> ApiResult<ShopItemView> {
    Ok(Json(state.league.shop_items().get(id).await?))
}

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ShopCategory>> {
    Ok(Json(state.league.shop_categories().list().await?))
}

/// GET /api/stats - all zeros when the store is unreachable
async fn stats(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(state.league.stats().await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams", get(list_teams))
        .route("/api/teams/{id}", get(get_team))
        .route("/api/teams/{id}/players", get(team_players))
        .route("/api/players", get(list_players))
        .route("/api/players/{id}", get(get_player))
        .route("/api/matches", get(list_matches))
        .route("/api/matches/{id}", get(get_match))
        .route("/api/news", get(list_news))
        .route("/api/news/featured", get(featured_news))
        .route("/api/news/{id}", get(get_news_item))
        .route("/api/shop/items", get(list_items))
        .route("/api/shop/items/{id}", get(get_item))
        .route("/api/shop/categories", get(list_categories))
        .route("/api/stats", get(stats))
}
