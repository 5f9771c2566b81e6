//! Versioned REST routes, mounted under `/v0`.

use crate::handlers::{
    create_player, create_player_week, delete_performance, delete_player, get_counts,
    list_leagues, list_performances, list_player_weeks, list_players, list_teams, list_weeks,
    read_league, read_player, read_week, update_performance, update_player,
};
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/:player_id",
            get(read_player).patch(update_player).delete(delete_player),
        )
        .route(
            "/players/:player_id/weeks",
            get(list_player_weeks).post(create_player_week),
        )
        .route("/performances", get(list_performances))
        .route(
            "/performances/:performance_id",
            patch(update_performance).delete(delete_performance),
        )
        .route("/leagues", get(list_leagues))
        .route("/leagues/:league_id", get(read_league))
        .route("/teams", get(list_teams))
        .route("/weeks", get(list_weeks))
        .route("/weeks/:week_number", get(read_week))
        .route("/counts", get(get_counts))
        .with_state(state)
}
