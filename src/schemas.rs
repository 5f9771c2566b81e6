//! Request and response records shared by the server and the client SDK.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One player's fantasy points for one week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Performance {
    pub performance_id: i64,
    pub player_id: i64,
    /// `YYYYWW`: season year followed by the zero-padded week.
    pub week_number: String,
    pub fantasy_points: f64,
    pub last_changed_date: NaiveDate,
}

/// Static roster attributes of a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PlayerBase {
    pub player_id: i64,
    pub gsis_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub last_changed_date: NaiveDate,
}

/// A player together with every recorded performance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    #[serde(flatten)]
    pub base: PlayerBase,
    #[serde(default)]
    pub performances: Vec<Performance>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TeamBase {
    pub league_id: i64,
    pub team_id: i64,
    pub team_name: String,
    pub last_changed_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TeamWeek {
    pub week_number: String,
    pub fantasy_points: f64,
    pub last_changed_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    #[serde(flatten)]
    pub base: TeamBase,
    #[serde(default)]
    pub players: Vec<PlayerBase>,
    #[serde(default)]
    pub weekly_scores: Vec<TeamWeek>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct LeagueBase {
    pub league_id: i64,
    pub league_name: String,
    pub scoring_type: String,
    pub league_size: i64,
    pub last_changed_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct League {
    #[serde(flatten)]
    pub base: LeagueBase,
    #[serde(default)]
    pub teams: Vec<TeamBase>,
}

/// Highest possible score for a week, per scoring type and league size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Week {
    pub week_number: String,
    pub ppr_8_max_points: f64,
    pub ppr_10_max_points: f64,
    pub ppr_12_max_points: f64,
    pub ppr_14_max_points: f64,
    pub half_ppr_8_max_points: f64,
    pub half_ppr_10_max_points: f64,
    pub half_ppr_12_max_points: f64,
    pub half_ppr_14_max_points: f64,
    pub std_8_max_points: f64,
    pub std_10_max_points: f64,
    pub std_12_max_points: f64,
    pub std_14_max_points: f64,
    pub last_changed_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Counts {
    pub league_count: i64,
    pub team_count: i64,
    pub player_count: i64,
    pub week_count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    pub message: String,
}

// Request bodies

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlayerCreate {
    /// Assigned by the database when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gsis_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    /// Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<NaiveDate>,
}

/// Partial update; at least one field must be present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlayerUpdate {
    /// Absent leaves the column alone; `null` clears it.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub gsis_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PerformanceCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_id: Option<i64>,
    pub week_number: String,
    pub fantasy_points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PerformanceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points: Option<f64>,
}

/// Any value present in the body, including `null`, becomes `Some`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Query strings. `None` fields are omitted when the client serializes them.

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlayerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_last_changed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Substring of "first_name last_name".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

/// Inclusive week bounds for one player's performances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeekRangeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_week: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerformanceQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_last_changed_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeagueQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_last_changed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_last_changed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_id: Option<i64>,
}
