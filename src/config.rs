//! Runtime settings read from the environment.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fantasy_data.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How text filters on names compare against stored values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameMatch {
    #[default]
    Exact,
    /// ASCII case-insensitive, via SQLite's NOCASE collation.
    IgnoreCase,
}

impl std::str::FromStr for NameMatch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(NameMatch::Exact),
            "ignore_case" | "nocase" => Ok(NameMatch::IgnoreCase),
            _ => Err(ConfigError::InvalidValue {
                var: "SWC_NAME_MATCH",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub name_match: NameMatch,
    /// Run once when the player table is empty.
    pub seed_script: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            name_match: NameMatch::Exact,
            seed_script: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_raw = lookup("SWC_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SWC_BIND_ADDR",
            value: bind_raw.clone(),
        })?;
        let name_match = match lookup("SWC_NAME_MATCH") {
            Some(v) => v.parse()?,
            None => NameMatch::Exact,
        };
        let seed_script = lookup("SWC_SEED_SQL")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let max_connections = match lookup("SWC_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "SWC_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Settings {
            database_url,
            bind_addr,
            name_match,
            seed_script,
            max_connections,
        })
    }
}
