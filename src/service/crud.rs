//! Player and player-week CRUD against SQLite.

use crate::config::NameMatch;
use crate::error::AppError;
use crate::schemas::{
    Performance, PerformanceCreate, PerformanceUpdate, Player, PlayerBase, PlayerCreate, PlayerUpdate,
};
use crate::sql::{
    bind_all, delete, insert, select_by_id, select_performances, select_players, select_where_in,
    update, BindValue, PerformanceFilter, PlayerFilter, QueryBuf, PERFORMANCE, PLAYER,
};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;
use std::collections::HashMap;

pub struct CrudService;

impl CrudService {
    /// List players matching all filters, each with its performances.
    pub async fn list_players(
        pool: &SqlitePool,
        filter: &PlayerFilter,
        name_match: NameMatch,
    ) -> Result<Vec<Player>, AppError> {
        let q = select_players(filter, name_match);
        let bases: Vec<PlayerBase> = fetch_all(pool, &q).await?;
        Self::attach_performances(pool, bases).await
    }

    /// Fetch one player by id, or `NotFound`.
    pub async fn read_player(pool: &SqlitePool, player_id: i64) -> Result<Player, AppError> {
        let base = Self::player_base(pool, player_id).await?;
        let mut players = Self::attach_performances(pool, vec![base]).await?;
        players
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }

    /// Insert one player. The id is assigned by SQLite when the body omits it.
    pub async fn create_player(pool: &SqlitePool, body: PlayerCreate) -> Result<Player, AppError> {
        let mut values: Vec<(&'static str, BindValue)> = Vec::with_capacity(6);
        if let Some(id) = body.player_id {
            if fetch_optional::<PlayerBase>(pool, &select_by_id(&PLAYER, id)).await?.is_some() {
                return Err(AppError::Conflict(format!("player {} already exists", id)));
            }
            values.push(("player_id", id.into()));
        }
        values.push(("gsis_id", body.gsis_id.into()));
        values.push(("first_name", body.first_name.into()));
        values.push(("last_name", body.last_name.into()));
        values.push(("position", body.position.into()));
        values.push(("last_changed_date", body.last_changed_date.unwrap_or_else(today).into()));
        let base: PlayerBase = fetch_one(pool, &insert(&PLAYER, values)).await?;
        tracing::info!(player_id = base.player_id, "player created");
        Ok(Player {
            base,
            performances: Vec::new(),
        })
    }

    /// Update the fields present in `body`. Returns the updated player, or `NotFound`.
    pub async fn update_player(
        pool: &SqlitePool,
        player_id: i64,
        body: PlayerUpdate,
    ) -> Result<Player, AppError> {
        let mut sets: Vec<(&'static str, BindValue)> = Vec::new();
        if let Some(v) = body.gsis_id {
            sets.push(("gsis_id", v.into()));
        }
        if let Some(v) = body.first_name {
            sets.push(("first_name", v.into()));
        }
        if let Some(v) = body.last_name {
            sets.push(("last_name", v.into()));
        }
        if let Some(v) = body.position {
            sets.push(("position", v.into()));
        }
        let base: PlayerBase = fetch_optional(pool, &update(&PLAYER, player_id, sets))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))?;
        let mut players = Self::attach_performances(pool, vec![base]).await?;
        players
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }

    /// Delete one player and, through the foreign key cascade, its performances.
    pub async fn delete_player(pool: &SqlitePool, player_id: i64) -> Result<(), AppError> {
        let deleted: Option<(i64,)> = fetch_optional(pool, &delete(&PLAYER, player_id)).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("player {}", player_id)));
        }
        tracing::info!(player_id, "player deleted");
        Ok(())
    }

    /// Performances for one player, bounded by the filter's week range.
    pub async fn list_player_weeks(
        pool: &SqlitePool,
        player_id: i64,
        filter: PerformanceFilter,
    ) -> Result<Vec<Performance>, AppError> {
        Self::player_base(pool, player_id).await?;
        let filter = PerformanceFilter {
            player_id: Some(player_id),
            ..filter
        };
        fetch_all(pool, &select_performances(&filter)).await
    }

    pub async fn list_performances(
        pool: &SqlitePool,
        filter: &PerformanceFilter,
    ) -> Result<Vec<Performance>, AppError> {
        fetch_all(pool, &select_performances(filter)).await
    }

    /// Record one week for an existing player.
    pub async fn create_player_week(
        pool: &SqlitePool,
        player_id: i64,
        body: PerformanceCreate,
    ) -> Result<Performance, AppError> {
        Self::player_base(pool, player_id).await?;
        let mut values: Vec<(&'static str, BindValue)> = Vec::with_capacity(5);
        if let Some(id) = body.performance_id {
            if fetch_optional::<Performance>(pool, &select_by_id(&PERFORMANCE, id)).await?.is_some() {
                return Err(AppError::Conflict(format!("performance {} already exists", id)));
            }
            values.push(("performance_id", id.into()));
        }
        values.push(("player_id", player_id.into()));
        values.push(("week_number", body.week_number.into()));
        values.push(("fantasy_points", body.fantasy_points.into()));
        values.push(("last_changed_date", body.last_changed_date.unwrap_or_else(today).into()));
        let row: Performance = fetch_one(pool, &insert(&PERFORMANCE, values)).await?;
        tracing::info!(performance_id = row.performance_id, player_id, "performance created");
        Ok(row)
    }

    pub async fn update_performance(
        pool: &SqlitePool,
        performance_id: i64,
        body: PerformanceUpdate,
    ) -> Result<Performance, AppError> {
        let mut sets: Vec<(&'static str, BindValue)> = Vec::new();
        if let Some(v) = body.week_number {
            sets.push(("week_number", v.into()));
        }
        if let Some(v) = body.fantasy_points {
            sets.push(("fantasy_points", v.into()));
        }
        fetch_optional(pool, &update(&PERFORMANCE, performance_id, sets))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("performance {}", performance_id)))
    }

    pub async fn delete_performance(pool: &SqlitePool, performance_id: i64) -> Result<(), AppError> {
        let deleted: Option<(i64,)> = fetch_optional(pool, &delete(&PERFORMANCE, performance_id)).await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("performance {}", performance_id)));
        }
        tracing::info!(performance_id, "performance deleted");
        Ok(())
    }

    async fn player_base(pool: &SqlitePool, player_id: i64) -> Result<PlayerBase, AppError> {
        fetch_optional(pool, &select_by_id(&PLAYER, player_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
    }

    /// Batch-load performances for all players with one `IN (...)` query.
    async fn attach_performances(
        pool: &SqlitePool,
        bases: Vec<PlayerBase>,
    ) -> Result<Vec<Player>, AppError> {
        let ids: Vec<BindValue> = bases.iter().map(|p| BindValue::Int(p.player_id)).collect();
        let rows: Vec<Performance> = fetch_all(pool, &select_where_in(&PERFORMANCE, "player_id", &ids)).await?;
        let mut by_player: HashMap<i64, Vec<Performance>> = HashMap::new();
        for row in rows {
            by_player.entry(row.player_id).or_default().push(row);
        }
        Ok(bases
            .into_iter()
            .map(|base| {
                let performances = by_player.remove(&base.player_id).unwrap_or_default();
                Player { base, performances }
            })
            .collect())
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

pub(crate) async fn fetch_all<O>(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<O>, AppError>
where
    O: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let rows = bind_all(sqlx::query_as::<_, O>(&q.sql), &q.params)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub(crate) async fn fetch_optional<O>(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<O>, AppError>
where
    O: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let row = bind_all(sqlx::query_as::<_, O>(&q.sql), &q.params)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub(crate) async fn fetch_one<O>(pool: &SqlitePool, q: &QueryBuf) -> Result<O, AppError>
where
    O: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let row = bind_all(sqlx::query_as::<_, O>(&q.sql), &q.params)
        .fetch_one(pool)
        .await?;
    Ok(row)
}
