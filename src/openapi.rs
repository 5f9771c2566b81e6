//! OpenAPI document for the v0 API, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{leagues, performances, players};
use crate::schemas::{
    Counts, HealthCheck, League, LeagueBase, Performance, PerformanceCreate, PerformanceUpdate,
    Player, PlayerBase, PlayerCreate, PlayerUpdate, Team, TeamBase, TeamWeek, Week,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SportsWorldCentral (SWC) Fantasy Football API",
        description = "Fantasy football players, weekly performances, leagues, teams and week maxima."
    ),
    paths(
        players::list_players,
        players::read_player,
        players::create_player,
        players::update_player,
        players::delete_player,
        players::list_player_weeks,
        players::create_player_week,
        performances::list_performances,
        performances::update_performance,
        performances::delete_performance,
        leagues::list_leagues,
        leagues::read_league,
        leagues::list_teams,
        leagues::list_weeks,
        leagues::read_week,
        leagues::get_counts,
    ),
    components(schemas(
        Counts,
        HealthCheck,
        League,
        LeagueBase,
        Performance,
        PerformanceCreate,
        PerformanceUpdate,
        Player,
        PlayerBase,
        PlayerCreate,
        PlayerUpdate,
        Team,
        TeamBase,
        TeamWeek,
        Week,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "players", description = "Players and their weekly performances"),
        (name = "performances", description = "Weekly performances across players"),
        (name = "leagues", description = "Fantasy leagues"),
        (name = "teams", description = "Fantasy teams"),
        (name = "weeks", description = "Weekly maximum scores"),
        (name = "counts", description = "Row counts"),
    )
)]
pub struct ApiDoc;
