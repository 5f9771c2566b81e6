//! Player handlers: list, read, create, update, delete, and the player's weeks.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ValidJson, ValidQuery};
use crate::response::{success_created, success_ok};
use crate::schemas::{
    Performance, PerformanceCreate, Player, PlayerCreate, PlayerQuery, PlayerUpdate, WeekRangeQuery,
};
use crate::service::{parse_id, CrudService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/v0/players",
    tag = "players",
    params(PlayerQuery),
    responses(
        (status = 200, description = "Players matching every filter", body = [Player]),
        (status = 422, description = "Malformed filter", body = ErrorBody),
    )
)]
pub async fn list_players(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<PlayerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let players = CrudService::list_players(&state.pool, &filter, state.name_match()).await?;
    Ok(success_ok(players))
}

#[utoipa::path(
    get,
    path = "/v0/players/{player_id}",
    tag = "players",
    params(("player_id" = i64, Path, description = "Player identifier")),
    responses(
        (status = 200, body = Player),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn read_player(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id("player_id", &id_str)?;
    let player = CrudService::read_player(&state.pool, player_id).await?;
    Ok(success_ok(player))
}

#[utoipa::path(
    post,
    path = "/v0/players",
    tag = "players",
    request_body = PlayerCreate,
    responses(
        (status = 201, body = Player),
        (status = 409, description = "Explicit player_id already in use", body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn create_player(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<PlayerCreate>,
) -> Result<impl IntoResponse, AppError> {
    let player = CrudService::create_player(&state.pool, body).await?;
    Ok(success_created(player))
}

#[utoipa::path(
    patch,
    path = "/v0/players/{player_id}",
    tag = "players",
    params(("player_id" = i64, Path, description = "Player identifier")),
    request_body = PlayerUpdate,
    responses(
        (status = 200, body = Player),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn update_player(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<PlayerUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id("player_id", &id_str)?;
    let player = CrudService::update_player(&state.pool, player_id, body).await?;
    Ok(success_ok(player))
}

#[utoipa::path(
    delete,
    path = "/v0/players/{player_id}",
    tag = "players",
    params(("player_id" = i64, Path, description = "Player identifier")),
    responses(
        (status = 204, description = "Player and its performances removed"),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id("player_id", &id_str)?;
    CrudService::delete_player(&state.pool, player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v0/players/{player_id}/weeks",
    tag = "players",
    params(("player_id" = i64, Path, description = "Player identifier"), WeekRangeQuery),
    responses(
        (status = 200, description = "Performances ordered by week", body = [Performance]),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn list_player_weeks(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidQuery(filter): ValidQuery<WeekRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id("player_id", &id_str)?;
    let weeks = CrudService::list_player_weeks(&state.pool, player_id, filter).await?;
    Ok(success_ok(weeks))
}

#[utoipa::path(
    post,
    path = "/v0/players/{player_id}/weeks",
    tag = "players",
    params(("player_id" = i64, Path, description = "Player identifier")),
    request_body = PerformanceCreate,
    responses(
        (status = 201, body = Performance),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn create_player_week(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<PerformanceCreate>,
) -> Result<impl IntoResponse, AppError> {
    let player_id = parse_id("player_id", &id_str)?;
    let performance = CrudService::create_player_week(&state.pool, player_id, body).await?;
    Ok(success_created(performance))
}
