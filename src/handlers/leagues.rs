//! League, team, week and count handlers. All read-only.

use crate::error::{AppError, ErrorBody};
use crate::extractors::ValidQuery;
use crate::response::success_ok;
use crate::schemas::{Counts, League, LeagueQuery, Team, TeamQuery, Week};
use crate::service::validation::week_number;
use crate::service::{parse_id, LeagueService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/v0/leagues",
    tag = "leagues",
    params(LeagueQuery),
    responses((status = 200, body = [League]), (status = 422, body = ErrorBody))
)]
pub async fn list_leagues(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<LeagueQuery>,
) -> Result<impl IntoResponse, AppError> {
    let leagues = LeagueService::list_leagues(&state.pool, &filter, state.name_match()).await?;
    Ok(success_ok(leagues))
}

#[utoipa::path(
    get,
    path = "/v0/leagues/{league_id}",
    tag = "leagues",
    params(("league_id" = i64, Path, description = "League identifier")),
    responses(
        (status = 200, body = League),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn read_league(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let league_id = parse_id("league_id", &id_str)?;
    let league = LeagueService::read_league(&state.pool, league_id).await?;
    Ok(success_ok(league))
}

#[utoipa::path(
    get,
    path = "/v0/teams",
    tag = "teams",
    params(TeamQuery),
    responses((status = 200, body = [Team]), (status = 422, body = ErrorBody))
)]
pub async fn list_teams(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<TeamQuery>,
) -> Result<impl IntoResponse, AppError> {
    let teams = LeagueService::list_teams(&state.pool, &filter, state.name_match()).await?;
    Ok(success_ok(teams))
}

#[utoipa::path(
    get,
    path = "/v0/weeks",
    tag = "weeks",
    responses((status = 200, description = "Weekly maximum scores", body = [Week]))
)]
pub async fn list_weeks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let weeks = LeagueService::list_weeks(&state.pool).await?;
    Ok(success_ok(weeks))
}

#[utoipa::path(
    get,
    path = "/v0/weeks/{week_number}",
    tag = "weeks",
    params(("week_number" = String, Path, description = "Week as YYYYWW")),
    responses(
        (status = 200, body = Week),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn read_week(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let week = week_number("week_number", raw)?;
    let row = LeagueService::read_week(&state.pool, &week).await?;
    Ok(success_ok(row))
}

#[utoipa::path(
    get,
    path = "/v0/counts",
    tag = "counts",
    responses((status = 200, body = Counts))
)]
pub async fn get_counts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let counts = LeagueService::counts(&state.pool).await?;
    Ok(success_ok(counts))
}
