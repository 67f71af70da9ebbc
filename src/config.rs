use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::sql::names::is_plain_identifier;

/// Schema that owns the permission functions and enum types by default.
pub const DEFAULT_PERMISSION_SCHEMA: &str = "supamode";

/// Options shared by the filter and permission compilers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Schema qualifying permission functions and enum casts in generated SQL.
    pub permission_schema: String,
    /// Time zone whose calendar days are used when comparing dates.
    pub timezone: TimezoneSetting,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            permission_schema: DEFAULT_PERMISSION_SCHEMA.to_string(),
            timezone: TimezoneSetting::Local,
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a config from JSON text. Missing fields take their defaults.
    pub fn load_from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_json(&content)
    }

    /// Check the settings that end up spliced into SQL text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_plain_identifier(&self.permission_schema) {
            return Err(ConfigError::InvalidSchema(self.permission_schema.clone()));
        }
        Ok(())
    }
}

/// Which time zone defines a "calendar day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TimezoneSetting {
    /// The process-local zone, DST rules included.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimezoneSetting {
    /// Wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            TimezoneSetting::Local => instant.with_timezone(&Local).naive_local(),
            TimezoneSetting::Utc => instant.naive_utc(),
            TimezoneSetting::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Instant at which this zone's clock reads `wall_clock`.
    ///
    /// Ambiguous readings resolve to the earlier instant; readings skipped by a
    /// DST jump resolve to `None`.
    pub fn instant_at(&self, wall_clock: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            TimezoneSetting::Local => Local
                .from_local_datetime(&wall_clock)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            TimezoneSetting::Utc => Some(wall_clock.and_utc()),
            TimezoneSetting::Fixed(offset) => offset
                .from_local_datetime(&wall_clock)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl FromStr for TimezoneSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(TimezoneSetting::Local),
            "utc" | "z" => Ok(TimezoneSetting::Utc),
            _ => trimmed
                .parse::<FixedOffset>()
                .map(TimezoneSetting::Fixed)
                .map_err(|_| ConfigError::InvalidTimezone(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimezoneSetting {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TimezoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezoneSetting::Local => write!(f, "local"),
            TimezoneSetting::Utc => write!(f, "utc"),
            TimezoneSetting::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
