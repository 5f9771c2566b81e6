//! Read-only access to leagues, teams, week maxima and table counts.

use super::crud::{fetch_all, fetch_one, fetch_optional};
use crate::config::NameMatch;
use crate::error::AppError;
use crate::schemas::{Counts, League, LeagueBase, PlayerBase, Team, TeamBase, TeamWeek, Week};
use crate::sql::{
    select_by_id, select_counts, select_leagues, select_team_players, select_team_weeks,
    select_teams, select_weeks, select_where_in, BindValue, LeagueFilter, TeamFilter, LEAGUE, TEAM,
    WEEK,
};
use sqlx::SqlitePool;
use std::collections::HashMap;

#[derive(sqlx::FromRow)]
struct TeamPlayerRow {
    team_id: i64,
    #[sqlx(flatten)]
    player: PlayerBase,
}

#[derive(sqlx::FromRow)]
struct TeamWeekRow {
    team_id: i64,
    #[sqlx(flatten)]
    week: TeamWeek,
}

pub struct LeagueService;

impl LeagueService {
    pub async fn list_leagues(
        pool: &SqlitePool,
        filter: &LeagueFilter,
        name_match: NameMatch,
    ) -> Result<Vec<League>, AppError> {
        let bases: Vec<LeagueBase> = fetch_all(pool, &select_leagues(filter, name_match)).await?;
        Self::attach_teams(pool, bases).await
    }

    pub async fn read_league(pool: &SqlitePool, league_id: i64) -> Result<League, AppError> {
        let base: LeagueBase = fetch_optional(pool, &select_by_id(&LEAGUE, league_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("league {}", league_id)))?;
        let mut leagues = Self::attach_teams(pool, vec![base]).await?;
        leagues
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("league {}", league_id)))
    }

    /// Teams with their rostered players and weekly scores.
    pub async fn list_teams(
        pool: &SqlitePool,
        filter: &TeamFilter,
        name_match: NameMatch,
    ) -> Result<Vec<Team>, AppError> {
        let bases: Vec<TeamBase> = fetch_all(pool, &select_teams(filter, name_match)).await?;
        let ids: Vec<BindValue> = bases.iter().map(|t| BindValue::Int(t.team_id)).collect();

        let mut players: HashMap<i64, Vec<PlayerBase>> = HashMap::new();
        for row in fetch_all::<TeamPlayerRow>(pool, &select_team_players(&ids)).await? {
            players.entry(row.team_id).or_default().push(row.player);
        }
        let mut weeks: HashMap<i64, Vec<TeamWeek>> = HashMap::new();
        for row in fetch_all::<TeamWeekRow>(pool, &select_team_weeks(&ids)).await? {
            weeks.entry(row.team_id).or_default().push(row.week);
        }

        Ok(bases
            .into_iter()
            .map(|base| Team {
                players: players.remove(&base.team_id).unwrap_or_default(),
                weekly_scores: weeks.remove(&base.team_id).unwrap_or_default(),
                base,
            })
            .collect())
    }

    pub async fn list_weeks(pool: &SqlitePool) -> Result<Vec<Week>, AppError> {
        fetch_all(pool, &select_weeks()).await
    }

    pub async fn read_week(pool: &SqlitePool, week_number: &str) -> Result<Week, AppError> {
        fetch_optional(pool, &select_by_id(&WEEK, week_number))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("week {}", week_number)))
    }

    pub async fn counts(pool: &SqlitePool) -> Result<Counts, AppError> {
        fetch_one(pool, &select_counts()).await
    }

    async fn attach_teams(pool: &SqlitePool, bases: Vec<LeagueBase>) -> Result<Vec<League>, AppError> {
        let ids: Vec<BindValue> = bases.iter().map(|l| BindValue::Int(l.league_id)).collect();
        let mut teams: HashMap<i64, Vec<TeamBase>> = HashMap::new();
        for team in fetch_all::<TeamBase>(pool, &select_where_in(&TEAM, "league_id", &ids)).await? {
            teams.entry(team.league_id).or_default().push(team);
        }
        Ok(bases
            .into_iter()
            .map(|base| League {
                teams: teams.remove(&base.league_id).unwrap_or_default(),
                base,
            })
            .collect())
    }
}
