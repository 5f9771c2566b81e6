//! HTTP surface: status codes, error envelope and filters, driven through the router.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{seeded_app, seeded_pool};
use serde_json::{json, Value};
use swc_api::{app, App, AppState, NameMatch, Settings, MAX_BODY_BYTES};
use tower::ServiceExt;

async fn send(app: &App, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &App, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// Status only, for answers whose body may not be JSON.
async fn status_of(app: &App, request: Request<Body>) -> StatusCode {
    app.clone().oneshot(request).await.unwrap().status()
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap()
}

#[tokio::test]
async fn health_check_answers_at_root() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "API health check successful"}));

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn ready_reports_unreachable_database() {
    let pool = seeded_pool().await;
    let router = app(AppState::new(pool.clone(), Settings::default()));
    pool.close().await;

    let (status, body) = get(&router, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "degraded", "database": "unavailable"}));
}

#[tokio::test]
async fn trailing_slash_reaches_same_route() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/v0/players/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 8);

    let (status, body) = get(&app, "/v0/leagues/5001/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["league_id"], 5001);
}

#[tokio::test]
async fn body_transport_failures_keep_their_status() {
    let app = seeded_app(NameMatch::Exact).await;

    let untyped = Request::builder()
        .method(Method::POST)
        .uri("/v0/players")
        .body(Body::from(
            json!({"first_name": "A", "last_name": "B", "position": "QB"}).to_string(),
        ))
        .unwrap();
    let (status, body) = {
        let response = app.clone().oneshot(untyped).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice::<Value>(&bytes).unwrap())
    };
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_code(&body), "unsupported_media_type");

    let oversized = Request::builder()
        .method(Method::POST)
        .uri("/v0/players")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("x".repeat(MAX_BODY_BYTES + 6 * 1024)))
        .unwrap();
    assert_eq!(status_of(&app, oversized).await, StatusCode::PAYLOAD_TOO_LARGE);

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/v0/players")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    assert_eq!(status_of(&app, malformed).await, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn read_player_by_id_and_missing_id() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/v0/players/1003").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["player_id"], 1003);
    assert_eq!(body["last_name"], "Mahomes");
    assert_eq!(body["performances"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/v0/players/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "not_found");
}

#[tokio::test]
async fn malformed_inputs_are_unprocessable() {
    let app = seeded_app(NameMatch::Exact).await;
    for uri in [
        "/v0/players/abc",
        "/v0/players/0",
        "/v0/players?limit=abc",
        "/v0/players?minimum_last_changed_date=yesterday",
        "/v0/players/1001/weeks?min_week=2023",
        "/v0/players/1001/weeks?min_week=202303&max_week=202301",
        "/v0/weeks/202399",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(error_code(&body), "validation_error", "{uri}");
    }
}

#[tokio::test]
async fn first_name_filter_returns_only_matches() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/v0/players?first_name=Bob").await;
    assert_eq!(status, StatusCode::OK);
    let players = body.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert!(players.iter().all(|p| p["first_name"] == "Bob"));

    let (_, body) = get(&app, "/v0/players?first_name=bob").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ignore_case_setting_widens_name_filters() {
    let app = seeded_app(NameMatch::IgnoreCase).await;
    let (status, body) = get(&app, "/v0/players?first_name=bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_read_delete_cycle() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/v0/players",
        Some(json!({"first_name": "Bob", "last_name": "Newman", "position": "k"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["position"], "K");
    let id = created["player_id"].as_i64().unwrap();

    let (status, read) = get(&app, &format!("/v0/players/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read, created);

    let (status, body) = send(&app, Method::DELETE, &format!("/v0/players/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = get(&app, &format!("/v0/players/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_bad_bodies() {
    let app = seeded_app(NameMatch::Exact).await;
    let cases = [
        json!({"first_name": "A", "last_name": "B", "position": "QB", "nickname": "x"}),
        json!({"first_name": "", "last_name": "B", "position": "QB"}),
        json!({"last_name": "B", "position": "QB"}),
        json!({"first_name": "A", "last_name": "B", "position": "QB1"}),
    ];
    for body in cases {
        let (status, reply) = send(&app, Method::POST, "/v0/players", Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        assert_eq!(error_code(&reply), "validation_error");
    }

    let (status, reply) = send(
        &app,
        Method::POST,
        "/v0/players",
        Some(json!({"player_id": 1001, "first_name": "A", "last_name": "B", "position": "QB"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&reply), "conflict");
}

#[tokio::test]
async fn patch_player_and_empty_patch() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = send(&app, Method::PATCH, "/v0/players/1002", Some(json!({"position": "te"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], "TE");
    assert_eq!(body["last_name"], "Wilson");

    let (status, body) = send(&app, Method::PATCH, "/v0/players/1001", Some(json!({"gsis_id": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gsis_id"], Value::Null);
    assert_eq!(body["first_name"], "Aaron");

    let (status, _) = send(&app, Method::PATCH, "/v0/players/1002", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::PATCH, "/v0/players/999999", Some(json!({"position": "TE"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn player_weeks_round_trip() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/v0/players/1001/weeks?min_week=202302&max_week=202303").await;
    assert_eq!(status, StatusCode::OK);
    let weeks: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["week_number"].as_str().unwrap())
        .collect();
    assert_eq!(weeks, vec!["202302", "202303"]);

    let (status, created) = send(
        &app,
        Method::POST,
        "/v0/players/1005/weeks",
        Some(json!({"week_number": "202302", "fantasy_points": 22.5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["player_id"], 1005);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v0/players/999999/weeks",
        Some(json!({"week_number": "202302", "fantasy_points": 22.5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v0/players/1005/weeks",
        Some(json!({"week_number": "202302", "fantasy_points": 500.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn performances_patch_and_delete() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/v0/performances/17001",
        Some(json!({"fantasy_points": 21.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fantasy_points"], 21.5);

    let (status, _) = send(&app, Method::DELETE, "/v0/performances/17001", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/v0/performances/17001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/v0/performances?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["performance_id"], 17002);
}

#[tokio::test]
async fn read_only_collections() {
    let app = seeded_app(NameMatch::Exact).await;

    let (status, body) = get(&app, "/v0/leagues/5001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teams"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/v0/teams?league_id=5002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/v0/weeks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = get(&app, "/v0/weeks/202310").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/v0/counts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"league_count": 2, "team_count": 4, "player_count": 8, "week_count": 3})
    );
}

#[tokio::test]
async fn openapi_document_lists_player_routes() {
    let app = seeded_app(NameMatch::Exact).await;
    let (status, body) = get(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v0/players"].is_object());
    assert!(body["paths"]["/v0/players/{player_id}/weeks"].is_object());
}
