//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the fantasy tables.

use crate::config::NameMatch;
use crate::sql::params::BindValue;
use chrono::NaiveDate;

/// Default page size when `limit` is omitted.
pub const DEFAULT_LIMIT: u32 = 100;
/// Largest page a single list call returns.
pub const MAX_LIMIT: u32 = 1000;

/// A table the API reads and writes. Identifiers only ever come from these constants.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub pk: &'static str,
    pub columns: &'static [&'static str],
}

pub const PLAYER: Table = Table {
    name: "player",
    pk: "player_id",
    columns: &["player_id", "gsis_id", "first_name", "last_name", "position", "last_changed_date"],
};

pub const PERFORMANCE: Table = Table {
    name: "performance",
    pk: "performance_id",
    columns: &["performance_id", "player_id", "week_number", "fantasy_points", "last_changed_date"],
};

pub const LEAGUE: Table = Table {
    name: "league",
    pk: "league_id",
    columns: &["league_id", "league_name", "scoring_type", "league_size", "last_changed_date"],
};

pub const TEAM: Table = Table {
    name: "team",
    pk: "team_id",
    columns: &["league_id", "team_id", "team_name", "last_changed_date"],
};

pub const WEEK: Table = Table {
    name: "week",
    pk: "week_number",
    columns: &[
        "week_number",
        "ppr_8_max_points",
        "ppr_10_max_points",
        "ppr_12_max_points",
        "ppr_14_max_points",
        "half_ppr_8_max_points",
        "half_ppr_10_max_points",
        "half_ppr_12_max_points",
        "half_ppr_14_max_points",
        "std_8_max_points",
        "std_10_max_points",
        "std_12_max_points",
        "std_14_max_points",
        "last_changed_date",
    ],
};

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

/// Offset and row count for list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// Fill defaults and cap the limit at [`MAX_LIMIT`].
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Page {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }

    fn clause(&self) -> String {
        format!(" LIMIT {} OFFSET {}", self.limit, self.skip)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name_contains: Option<String>,
    pub position: Option<String>,
    pub team_id: Option<i64>,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub page: Page,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerformanceFilter {
    pub player_id: Option<i64>,
    pub min_week: Option<String>,
    pub max_week: Option<String>,
    pub minimum_last_changed_date: Option<NaiveDate>,
    /// `None` returns every matching row.
    pub page: Option<Page>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeagueFilter {
    pub league_name: Option<String>,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub page: Page,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamFilter {
    pub team_name: Option<String>,
    pub league_id: Option<i64>,
    pub minimum_last_changed_date: Option<NaiveDate>,
    pub page: Page,
}

/// AND-ed predicates; parameters are collected in predicate order.
#[derive(Default)]
struct Predicates {
    parts: Vec<String>,
    params: Vec<BindValue>,
}

impl Predicates {
    fn push(&mut self, sql: String, value: impl Into<BindValue>) {
        self.parts.push(sql);
        self.params.push(value.into());
    }

    fn text_eq(&mut self, column: &str, value: &Option<String>, name_match: NameMatch) {
        if let Some(v) = value {
            let sql = match name_match {
                NameMatch::Exact => format!("{} = ?", column),
                NameMatch::IgnoreCase => format!("{} = ? COLLATE NOCASE", column),
            };
            self.push(sql, v.as_str());
        }
    }

    fn text_contains(&mut self, expr: &str, value: &Option<String>, name_match: NameMatch) {
        if let Some(v) = value {
            let sql = match name_match {
                NameMatch::Exact => format!("instr({}, ?) > 0", expr),
                NameMatch::IgnoreCase => format!("instr(lower({}), lower(?)) > 0", expr),
            };
            self.push(sql, v.as_str());
        }
    }

    fn min_date(&mut self, value: Option<NaiveDate>) {
        if let Some(d) = value {
            self.push("last_changed_date >= ?".into(), d);
        }
    }

    fn finish(self, q: &mut QueryBuf) {
        if !self.parts.is_empty() {
            q.sql.push_str(" WHERE ");
            q.sql.push_str(&self.parts.join(" AND "));
        }
        q.params.extend(self.params);
    }
}

fn column_list(table: &Table) -> String {
    table.columns.join(", ")
}

fn qualified_column_list(alias: &str, table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| format!("{}.{} AS {}", alias, c, c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// SELECT one row by primary key.
pub fn select_by_id(table: &Table, id: impl Into<BindValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        column_list(table),
        table.name,
        table.pk
    );
    q.params.push(id.into());
    q
}

/// SELECT rows where `column IN (values)` ORDER BY pk. Used for batch-loading children.
pub fn select_where_in(table: &Table, column: &str, values: &[BindValue]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = column_list(table);
    if values.is_empty() {
        q.sql = format!("SELECT {} FROM {} WHERE 1 = 0", cols, table.name);
        return q;
    }
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} IN ({}) ORDER BY {}",
        cols,
        table.name,
        column,
        placeholders(values.len()),
        table.pk
    );
    q.params.extend(values.iter().cloned());
    q
}

/// SELECT players matching every filter that is set, ORDER BY player_id.
pub fn select_players(filter: &PlayerFilter, name_match: NameMatch) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", column_list(&PLAYER), PLAYER.name);
    let mut preds = Predicates::default();
    preds.text_eq("first_name", &filter.first_name, name_match);
    preds.text_eq("last_name", &filter.last_name, name_match);
    preds.text_contains("first_name || ' ' || last_name", &filter.name_contains, name_match);
    if let Some(position) = &filter.position {
        preds.push("position = ?".into(), position.as_str());
    }
    if let Some(team_id) = filter.team_id {
        preds.push(
            "player_id IN (SELECT player_id FROM team_player WHERE team_id = ?)".into(),
            team_id,
        );
    }
    preds.min_date(filter.minimum_last_changed_date);
    preds.finish(&mut q);
    q.sql.push_str(&format!(" ORDER BY {}", PLAYER.pk));
    q.sql.push_str(&filter.page.clause());
    q
}

/// SELECT performances, optionally for one player and bounded by week (inclusive).
pub fn select_performances(filter: &PerformanceFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", column_list(&PERFORMANCE), PERFORMANCE.name);
    let mut preds = Predicates::default();
    if let Some(player_id) = filter.player_id {
        preds.push("player_id = ?".into(), player_id);
    }
    if let Some(min) = &filter.min_week {
        preds.push("week_number >= ?".into(), min.as_str());
    }
    if let Some(max) = &filter.max_week {
        preds.push("week_number <= ?".into(), max.as_str());
    }
    preds.min_date(filter.minimum_last_changed_date);
    preds.finish(&mut q);
    if filter.player_id.is_some() {
        q.sql.push_str(&format!(" ORDER BY week_number, {}", PERFORMANCE.pk));
    } else {
        q.sql.push_str(&format!(" ORDER BY {}", PERFORMANCE.pk));
    }
    if let Some(page) = &filter.page {
        q.sql.push_str(&page.clause());
    }
    q
}

pub fn select_leagues(filter: &LeagueFilter, name_match: NameMatch) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", column_list(&LEAGUE), LEAGUE.name);
    let mut preds = Predicates::default();
    preds.text_eq("league_name", &filter.league_name, name_match);
    preds.min_date(filter.minimum_last_changed_date);
    preds.finish(&mut q);
    q.sql.push_str(&format!(" ORDER BY {}", LEAGUE.pk));
    q.sql.push_str(&filter.page.clause());
    q
}

pub fn select_teams(filter: &TeamFilter, name_match: NameMatch) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", column_list(&TEAM), TEAM.name);
    let mut preds = Predicates::default();
    preds.text_eq("team_name", &filter.team_name, name_match);
    if let Some(league_id) = filter.league_id {
        preds.push("league_id = ?".into(), league_id);
    }
    preds.min_date(filter.minimum_last_changed_date);
    preds.finish(&mut q);
    q.sql.push_str(&format!(" ORDER BY {}", TEAM.pk));
    q.sql.push_str(&filter.page.clause());
    q
}

/// Players on any of the given teams, each row prefixed with its `team_id`.
pub fn select_team_players(team_ids: &[BindValue]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = qualified_column_list("p", &PLAYER);
    if team_ids.is_empty() {
        q.sql = format!("SELECT tp.team_id AS team_id, {} FROM team_player tp JOIN player p ON p.player_id = tp.player_id WHERE 1 = 0", cols);
        return q;
    }
    q.sql = format!(
        "SELECT tp.team_id AS team_id, {} FROM team_player tp JOIN player p ON p.player_id = tp.player_id \
         WHERE tp.team_id IN ({}) ORDER BY tp.team_id, p.player_id",
        cols,
        placeholders(team_ids.len())
    );
    q.params.extend(team_ids.iter().cloned());
    q
}

/// Weekly team scores for the given teams, ordered by team then week.
pub fn select_team_weeks(team_ids: &[BindValue]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = "team_id, week_number, fantasy_points, last_changed_date";
    if team_ids.is_empty() {
        q.sql = format!("SELECT {} FROM team_week WHERE 1 = 0", cols);
        return q;
    }
    q.sql = format!(
        "SELECT {} FROM team_week WHERE team_id IN ({}) ORDER BY team_id, week_number",
        cols,
        placeholders(team_ids.len())
    );
    q.params.extend(team_ids.iter().cloned());
    q
}

pub fn select_weeks() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {} ORDER BY {}", column_list(&WEEK), WEEK.name, WEEK.pk);
    q
}

pub fn select_counts() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT \
             (SELECT COUNT(*) FROM league) AS league_count, \
             (SELECT COUNT(*) FROM team) AS team_count, \
             (SELECT COUNT(*) FROM player) AS player_count, \
             (SELECT COUNT(*) FROM week) AS week_count"
        .into();
    q
}

/// INSERT the given columns and return the stored row.
pub fn insert(table: &Table, values: Vec<(&'static str, BindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table.name,
        cols.join(", "),
        placeholders(cols.len()),
        column_list(table)
    );
    q.params.extend(values.into_iter().map(|(_, v)| v));
    q
}

/// UPDATE by primary key: SET the given columns and stamp `last_changed_date` with today.
pub fn update(
    table: &Table,
    id: impl Into<BindValue>,
    sets: Vec<(&'static str, BindValue)>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut assignments: Vec<String> = sets.iter().map(|(c, _)| format!("{} = ?", c)).collect();
    assignments.push("last_changed_date = date('now')".into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
        table.name,
        assignments.join(", "),
        table.pk,
        column_list(table)
    );
    q.params.extend(sets.into_iter().map(|(_, v)| v));
    q.params.push(id.into());
    q
}

/// DELETE by primary key, returning the deleted key.
pub fn delete(table: &Table, id: impl Into<BindValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ? RETURNING {}",
        table.name, table.pk, table.pk
    );
    q.params.push(id.into());
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_player_filter_selects_first_page() {
        let q = select_players(&PlayerFilter::default(), NameMatch::Exact);
        assert_eq!(
            q.sql,
            "SELECT player_id, gsis_id, first_name, last_name, position, last_changed_date \
             FROM player ORDER BY player_id LIMIT 100 OFFSET 0"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn player_filters_are_anded_in_order() {
        let filter = PlayerFilter {
            first_name: Some("Bob".into()),
            position: Some("QB".into()),
            team_id: Some(7),
            page: Page::new(Some(10), Some(5)),
            ..Default::default()
        };
        let q = select_players(&filter, NameMatch::Exact);
        assert!(q.sql.contains(
            "WHERE first_name = ? AND position = ? AND player_id IN (SELECT player_id FROM team_player WHERE team_id = ?)"
        ));
        assert!(q.sql.ends_with("ORDER BY player_id LIMIT 5 OFFSET 10"));
        assert_eq!(
            q.params,
            vec![BindValue::Text("Bob".into()), BindValue::Text("QB".into()), BindValue::Int(7)]
        );
    }

    #[test]
    fn ignore_case_uses_nocase_collation() {
        let filter = PlayerFilter {
            last_name: Some("smith".into()),
            name_contains: Some("ob sm".into()),
            ..Default::default()
        };
        let q = select_players(&filter, NameMatch::IgnoreCase);
        assert!(q.sql.contains("last_name = ? COLLATE NOCASE"));
        assert!(q.sql.contains("instr(lower(first_name || ' ' || last_name), lower(?)) > 0"));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn page_limit_is_capped() {
        assert_eq!(Page::new(None, Some(5000)).limit, MAX_LIMIT);
        assert_eq!(Page::new(None, None), Page { skip: 0, limit: DEFAULT_LIMIT });
    }

    #[test]
    fn week_range_bounds_are_inclusive() {
        let filter = PerformanceFilter {
            player_id: Some(1001),
            min_week: Some("202302".into()),
            max_week: Some("202305".into()),
            ..Default::default()
        };
        let q = select_performances(&filter);
        assert!(q.sql.contains("WHERE player_id = ? AND week_number >= ? AND week_number <= ?"));
        assert!(q.sql.ends_with("ORDER BY week_number, performance_id"));
        assert_eq!(q.params[0], BindValue::Int(1001));
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let q = select_where_in(&PERFORMANCE, "player_id", &[]);
        assert!(q.sql.ends_with("WHERE 1 = 0"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn update_stamps_change_date_and_binds_id_last() {
        let q = update(&PLAYER, 5i64, vec![("position", BindValue::from("WR"))]);
        assert_eq!(
            q.sql,
            "UPDATE player SET position = ?, last_changed_date = date('now') WHERE player_id = ? \
             RETURNING player_id, gsis_id, first_name, last_name, position, last_changed_date"
        );
        assert_eq!(q.params, vec![BindValue::Text("WR".into()), BindValue::Int(5)]);
    }

    #[test]
    fn insert_and_delete_return_rows() {
        let q = insert(
            &PERFORMANCE,
            vec![("player_id", 1i64.into()), ("week_number", "202301".into())],
        );
        assert!(q.sql.starts_with("INSERT INTO performance (player_id, week_number) VALUES (?, ?) RETURNING"));
        let q = delete(&PLAYER, 9i64);
        assert_eq!(q.sql, "DELETE FROM player WHERE player_id = ? RETURNING player_id");
    }
}
