//! Parse-and-validate step between the wire records and the data access layer.
//!
//! Every request body and query string passes through [`Validate`] before any SQL is built.

use crate::error::AppError;
use crate::schemas::{
    LeagueQuery, PerformanceCreate, PerformanceQuery, PerformanceUpdate, PlayerCreate, PlayerQuery,
    PlayerUpdate, TeamQuery, WeekRangeQuery,
};
use crate::sql::{LeagueFilter, Page, PerformanceFilter, PlayerFilter, TeamFilter};
use regex::Regex;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_FANTASY_POINTS: f64 = -100.0;
pub const MAX_FANTASY_POINTS: f64 = 200.0;

/// `YYYYWW`, weeks 01 through 22.
const WEEK_NUMBER_PATTERN: &str = r"^\d{4}(0[1-9]|1[0-9]|2[0-2])$";
const POSITION_PATTERN: &str = r"^[A-Z]{1,4}$";

pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, AppError>;
}

fn matches_pattern(field: &str, value: &str, pattern: &str) -> Result<(), AppError> {
    let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
    if !re.is_match(value) {
        return Err(AppError::Validation(format!("{} does not match required pattern", field)));
    }
    Ok(())
}

/// Trimmed, non-empty, at most [`MAX_NAME_LENGTH`] characters.
fn required_text(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

fn optional_text(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    value.map(|v| required_text(field, v)).transpose()
}

fn position(value: String) -> Result<String, AppError> {
    let upper = required_text("position", value)?.to_ascii_uppercase();
    matches_pattern("position", &upper, POSITION_PATTERN)?;
    Ok(upper)
}

pub fn week_number(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim().to_string();
    matches_pattern(field, &trimmed, WEEK_NUMBER_PATTERN)?;
    Ok(trimmed)
}

fn positive_id(field: &str, value: Option<i64>) -> Result<Option<i64>, AppError> {
    match value {
        Some(n) if n <= 0 => Err(AppError::Validation(format!("{} must be positive", field))),
        other => Ok(other),
    }
}

fn fantasy_points(value: f64) -> Result<f64, AppError> {
    if !value.is_finite() {
        return Err(AppError::Validation("fantasy_points must be a finite number".into()));
    }
    if value < MIN_FANTASY_POINTS {
        return Err(AppError::Validation(format!(
            "fantasy_points must be at least {}",
            MIN_FANTASY_POINTS
        )));
    }
    if value > MAX_FANTASY_POINTS {
        return Err(AppError::Validation(format!(
            "fantasy_points must be at most {}",
            MAX_FANTASY_POINTS
        )));
    }
    Ok(value)
}

/// Parse a path identifier.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, AppError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", field)))?;
    positive_id(field, Some(n))?;
    Ok(n)
}

impl Validate for PlayerQuery {
    type Output = PlayerFilter;

    fn validate(self) -> Result<PlayerFilter, AppError> {
        Ok(PlayerFilter {
            first_name: optional_text("first_name", self.first_name)?,
            last_name: optional_text("last_name", self.last_name)?,
            name_contains: optional_text("name", self.name)?,
            position: self.position.map(position).transpose()?,
            team_id: positive_id("team_id", self.team_id)?,
            minimum_last_changed_date: self.minimum_last_changed_date,
            page: Page::new(self.skip, self.limit),
        })
    }
}

impl Validate for WeekRangeQuery {
    type Output = PerformanceFilter;

    fn validate(self) -> Result<PerformanceFilter, AppError> {
        let min_week = self.min_week.map(|w| week_number("min_week", w)).transpose()?;
        let max_week = self.max_week.map(|w| week_number("max_week", w)).transpose()?;
        if let (Some(min), Some(max)) = (&min_week, &max_week) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "min_week {} is after max_week {}",
                    min, max
                )));
            }
        }
        Ok(PerformanceFilter {
            min_week,
            max_week,
            ..Default::default()
        })
    }
}

impl Validate for PerformanceQuery {
    type Output = PerformanceFilter;

    fn validate(self) -> Result<PerformanceFilter, AppError> {
        Ok(PerformanceFilter {
            minimum_last_changed_date: self.minimum_last_changed_date,
            page: Some(Page::new(self.skip, self.limit)),
            ..Default::default()
        })
    }
}

impl Validate for LeagueQuery {
    type Output = LeagueFilter;

    fn validate(self) -> Result<LeagueFilter, AppError> {
        Ok(LeagueFilter {
            league_name: optional_text("league_name", self.league_name)?,
            minimum_last_changed_date: self.minimum_last_changed_date,
            page: Page::new(self.skip, self.limit),
        })
    }
}

impl Validate for TeamQuery {
    type Output = TeamFilter;

    fn validate(self) -> Result<TeamFilter, AppError> {
        Ok(TeamFilter {
            team_name: optional_text("team_name", self.team_name)?,
            league_id: positive_id("league_id", self.league_id)?,
            minimum_last_changed_date: self.minimum_last_changed_date,
            page: Page::new(self.skip, self.limit),
        })
    }
}

impl Validate for PlayerCreate {
    type Output = PlayerCreate;

    fn validate(self) -> Result<PlayerCreate, AppError> {
        Ok(PlayerCreate {
            player_id: positive_id("player_id", self.player_id)?,
            gsis_id: optional_text("gsis_id", self.gsis_id)?,
            first_name: required_text("first_name", self.first_name)?,
            last_name: required_text("last_name", self.last_name)?,
            position: position(self.position)?,
            last_changed_date: self.last_changed_date,
        })
    }
}

impl Validate for PlayerUpdate {
    type Output = PlayerUpdate;

    fn validate(self) -> Result<PlayerUpdate, AppError> {
        let out = PlayerUpdate {
            gsis_id: match self.gsis_id {
                Some(value) => Some(optional_text("gsis_id", value)?),
                None => None,
            },
            first_name: optional_text("first_name", self.first_name)?,
            last_name: optional_text("last_name", self.last_name)?,
            position: self.position.map(position).transpose()?,
        };
        if out == PlayerUpdate::default() {
            return Err(AppError::Validation("update must set at least one field".into()));
        }
        Ok(out)
    }
}

impl Validate for PerformanceCreate {
    type Output = PerformanceCreate;

    fn validate(self) -> Result<PerformanceCreate, AppError> {
        Ok(PerformanceCreate {
            performance_id: positive_id("performance_id", self.performance_id)?,
            week_number: week_number("week_number", self.week_number)?,
            fantasy_points: fantasy_points(self.fantasy_points)?,
            last_changed_date: self.last_changed_date,
        })
    }
}

impl Validate for PerformanceUpdate {
    type Output = PerformanceUpdate;

    fn validate(self) -> Result<PerformanceUpdate, AppError> {
        let out = PerformanceUpdate {
            week_number: self.week_number.map(|w| week_number("week_number", w)).transpose()?,
            fantasy_points: self.fantasy_points.map(fantasy_points).transpose()?,
        };
        if out.week_number.is_none() && out.fantasy_points.is_none() {
            return Err(AppError::Validation("update must set at least one field".into()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_validation<T: std::fmt::Debug>(r: Result<T, AppError>) -> bool {
        matches!(r, Err(AppError::Validation(_)))
    }

    #[test]
    fn player_query_trims_and_uppercases() {
        let filter = PlayerQuery {
            first_name: Some("  Bob ".into()),
            position: Some("qb".into()),
            limit: Some(5000),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(filter.first_name.as_deref(), Some("Bob"));
        assert_eq!(filter.position.as_deref(), Some("QB"));
        assert_eq!(filter.page.limit, crate::sql::MAX_LIMIT);
    }

    #[test]
    fn blank_filters_are_rejected() {
        assert!(is_validation(
            PlayerQuery {
                last_name: Some("   ".into()),
                ..Default::default()
            }
            .validate()
        ));
        assert!(is_validation(
            TeamQuery {
                league_id: Some(0),
                ..Default::default()
            }
            .validate()
        ));
    }

    #[test]
    fn week_range_must_be_ordered() {
        let ok = WeekRangeQuery {
            min_week: Some("202301".into()),
            max_week: Some("202304".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.min_week.as_deref(), Some("202301"));

        assert!(is_validation(
            WeekRangeQuery {
                min_week: Some("202305".into()),
                max_week: Some("202301".into()),
            }
            .validate()
        ));
    }

    #[test]
    fn week_numbers_need_year_and_week() {
        assert!(week_number("week_number", "202317".into()).is_ok());
        assert!(is_validation(week_number("week_number", "2023".into())));
        assert!(is_validation(week_number("week_number", "202300".into())));
        assert!(is_validation(week_number("week_number", "202323".into())));
        assert!(is_validation(week_number("week_number", "week 1".into())));
    }

    #[test]
    fn player_create_normalizes_fields() {
        let create = PlayerCreate {
            first_name: " Bob".into(),
            last_name: "Smith ".into(),
            position: "wr".into(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(create.first_name, "Bob");
        assert_eq!(create.last_name, "Smith");
        assert_eq!(create.position, "WR");

        assert!(is_validation(
            PlayerCreate {
                first_name: "Bob".into(),
                last_name: "Smith".into(),
                position: "WIDE RECEIVER".into(),
                ..Default::default()
            }
            .validate()
        ));
    }

    #[test]
    fn empty_updates_are_rejected() {
        assert!(is_validation(PlayerUpdate::default().validate()));
        assert!(is_validation(PerformanceUpdate::default().validate()));
        assert!(PerformanceUpdate {
            fantasy_points: Some(12.5),
            ..Default::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn player_update_can_clear_gsis_id() {
        let cleared: PlayerUpdate = serde_json::from_str(r#"{"gsis_id": null}"#).unwrap();
        assert_eq!(cleared.gsis_id, Some(None));
        assert_eq!(cleared.validate().unwrap().gsis_id, Some(None));

        let absent: PlayerUpdate = serde_json::from_str(r#"{"position": "te"}"#).unwrap();
        assert_eq!(absent.gsis_id, None);
        assert!(is_validation(
            serde_json::from_str::<PlayerUpdate>(r#"{"gsis_id": "  "}"#)
                .unwrap()
                .validate()
        ));
    }

    #[test]
    fn fantasy_points_are_bounded() {
        let create = |points: f64| PerformanceCreate {
            week_number: "202301".into(),
            fantasy_points: points,
            ..Default::default()
        };
        assert!(create(23.4).validate().is_ok());
        assert!(is_validation(create(f64::NAN).validate()));
        assert!(is_validation(create(MAX_FANTASY_POINTS + 1.0).validate()));
    }

    #[test]
    fn path_ids_must_be_positive_integers() {
        assert_eq!(parse_id("player_id", "1001").unwrap(), 1001);
        assert!(is_validation(parse_id("player_id", "abc")));
        assert!(is_validation(parse_id("player_id", "-3")));
    }
}
