//! Values bound to SQLite statement placeholders.

use chrono::NaiveDate;
use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value that can be bound to a SQLite query. SQLite has four storage classes we use.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Int(n)
    }
}

impl From<f64> for BindValue {
    fn from(n: f64) -> Self {
        BindValue::Real(n)
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

/// Dates are stored as ISO-8601 text so they sort and compare as strings.
impl From<NaiveDate> for BindValue {
    fn from(d: NaiveDate) -> Self {
        BindValue::Text(d.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BindValue::Null)
    }
}

/// Bind every parameter in order onto a typed query.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [BindValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            BindValue::Null => query.bind(None::<i64>),
            BindValue::Int(n) => query.bind(*n),
            BindValue::Real(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
