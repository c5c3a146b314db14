//! Router tests over the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use leaguectl_core::models::{NewsInput, PlayerInput, TeamInput};
use leaguectl_core::{League, MemoryStore, Mutations, Table};
use leaguectl_server::build_router;

fn app() -> (Router, League, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let league = League::new(store.clone());
    (build_router(league.clone(), false), league, store)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn seed_news(league: &League) {
    for (title, featured, published) in [
        ("Season opener", true, true),
        ("Draft article", true, false),
        ("Transfer rumours", false, true),
        ("Derby preview", true, true),
        ("Cup final report", true, true),
    ] {
        let input = NewsInput {
            is_featured: featured,
            published,
            ..NewsInput::new(title, "...")
        };
        league.news().create(&input).await.unwrap();
    }
}

#[tokio::test]
async fn health_endpoint() {
    let (app, _, _) = app();
    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn get_news_featured_with_limit() {
    let (app, league, _) = app();
    seed_news(&league).await;

    let request = Request::get("/get-news?featured=true&limit=2")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "authorization, x-client-info, apikey, content-type"
    );

    let news: Value = serde_json::from_slice(&body).unwrap();
    let titles: Vec<&str> = news
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Cup final report", "Derby preview"]);
}

#[tokio::test]
async fn get_news_without_params_lists_all_published() {
    let (app, league, _) = app();
    seed_news(&league).await;

    let (status, body) = get_json(app, "/get-news?featured=yes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert!(body.as_array().unwrap().iter().all(|n| n["published"] == true));
}

#[tokio::test]
async fn get_news_options_is_empty_200() {
    let (app, _, store) = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/get-news")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn get_news_bad_limit_is_400() {
    let (app, _, store) = app();
    let (status, body) = get_json(app, "/get-news?limit=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid limit: 'abc'"}));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn get_news_store_failure_is_400() {
    let (app, _, store) = app();
    store.fail(Table::News, "permission denied for table news").await;

    let (status, body) = get_json(app, "/get-news").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "permission denied for table news"}));
}

#[tokio::test]
async fn api_team_roster_and_not_found() {
    let (app, league, _) = app();
    let team = league.teams().create(&TeamInput::named("FC Nouadhibou")).await.unwrap();
    for (name, number) in [("Keeper", 1), ("Striker", 9)] {
        let input = PlayerInput {
            team_id: Some(team.id),
            jersey_number: Some(number),
            ..PlayerInput::named(name)
        };
        league.players().create(&input).await.unwrap();
    }

    let (status, body) = get_json(app.clone(), &format!("/api/teams/{}/players", team.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Keeper");
    assert_eq!(body[1]["jersey_number"], 9);

    let (status, body) = get_json(app.clone(), "/api/players").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["team"]["name"], "FC Nouadhibou");

    let missing = uuid::Uuid::new_v4();
    let (status, body) = get_json(app.clone(), &format!("/api/teams/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("team '{}' not found", missing));

    let (status, _) = get_json(app, "/api/teams/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_unpublished_news_is_hidden() {
    let (app, league, _) = app();
    let draft = NewsInput {
        published: false,
        ..NewsInput::new("Draft", "...")
    };
    let draft = league.news().create(&draft).await.unwrap();

    let (status, _) = get_json(app, &format!("/api/news/{}", draft.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_news_duplicate_limit_is_json_400() {
    let (app, _, store) = app();
    let (status, body) = get_json(app, "/api/news?limit=1&limit=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit"));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn api_stats_degrades_to_zero() {
    let (app, league, store) = app();
    league.teams().create(&TeamInput::named("Kaedi")).await.unwrap();

    let (_, body) = get_json(app.clone(), "/api/stats").await;
    assert_eq!(
        body,
        json!({"totalTeams": 1, "totalPlayers": 0, "totalMatches": 0, "totalItems": 0})
    );

    store.fail(Table::Players, "connection reset").await;
    let (status, body) = get_json(app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalTeams"], 0);
}

#[tokio::test]
async fn admin_create_update_delete_envelopes() {
    let (app, league, _) = app();

    let (status, body) = send_json(
        app.clone(),
        Method::POST,
        "/admin/teams",
        json!({"name": "ASAC Concorde", "city": "Nouakchott"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "ASAC Concorde");
    assert!(body.get("error").is_none());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        app.clone(),
        Method::PUT,
        &format!("/admin/teams/{}", id),
        json!({"name": "ASAC Concorde"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], Value::Null);

    let request = Request::delete(format!("/admin/teams/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"success": true}));
    assert!(league.teams().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_failures_keep_envelope_shape() {
    let (app, _, store) = app();

    let (status, body) = send_json(app.clone(), Method::POST, "/admin/teams", json!({"name": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "name is required"}));
    assert_eq!(store.calls(), 0);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send_json(
        app.clone(),
        Method::PUT,
        &format!("/admin/news/{}", missing),
        json!({"title": "t", "content": "c"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let request = Request::post("/admin/shop/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(app.clone(), request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    store.fail(Table::ShopCategories, "duplicate key value").await;
    let (status, body) = send_json(
        app,
        Method::POST,
        "/admin/shop/categories",
        json!({"name": "Jerseys"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "duplicate key value"}));
}

#[tokio::test]
async fn admin_match_with_same_teams_rejected() {
    let (app, league, store) = app();
    let team = league.teams().create(&TeamInput::named("Kaedi")).await.unwrap();
    let before = store.calls();

    let (status, body) = send_json(
        app,
        Method::POST,
        "/admin/matches",
        json!({
            "home_team_id": team.id,
            "away_team_id": team.id,
            "match_date": "2025-03-01T16:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(store.calls(), before);
}

#[tokio::test]
async fn admin_match_null_status_is_scheduled() {
    let (app, league, _) = app();
    let home = league.teams().create(&TeamInput::named("Nouadhibou")).await.unwrap();
    let away = league.teams().create(&TeamInput::named("Tevragh-Zeina")).await.unwrap();

    let (status, body) = send_json(
        app,
        Method::POST,
        "/admin/matches",
        json!({
            "home_team_id": home.id,
            "away_team_id": away.id,
            "match_date": "2025-03-01T16:00:00Z",
            "status": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "scheduled");
}
