//! Schedule configuration types
//!
//! The schedule is process-wide: it is loaded once at startup and read-only
//! thereafter. An unrecognized time unit is a configuration error surfaced at
//! load time, not a runtime fault.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The five recognized schedule time units
///
/// Parsing is case-sensitive: `"SECONDS"` parses, `"seconds"` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeUnit {
    /// Milliseconds
    Milliseconds,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Days
    Days,
}

impl TimeUnit {
    /// Canonical name of the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "MILLISECONDS",
            TimeUnit::Seconds => "SECONDS",
            TimeUnit::Minutes => "MINUTES",
            TimeUnit::Hours => "HOURS",
            TimeUnit::Days => "DAYS",
        }
    }

    /// Convert a period expressed in this unit to a [`Duration`]
    pub fn to_duration(&self, period: u64) -> Duration {
        match self {
            TimeUnit::Milliseconds => Duration::from_millis(period),
            TimeUnit::Seconds => Duration::from_secs(period),
            TimeUnit::Minutes => Duration::from_secs(period.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(period.saturating_mul(3600)),
            TimeUnit::Days => Duration::from_secs(period.saturating_mul(86_400)),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MILLISECONDS" => Ok(TimeUnit::Milliseconds),
            "SECONDS" => Ok(TimeUnit::Seconds),
            "MINUTES" => Ok(TimeUnit::Minutes),
            "HOURS" => Ok(TimeUnit::Hours),
            "DAYS" => Ok(TimeUnit::Days),
            other => Err(ConfigError::UnsupportedTimeUnit(other.to_string())),
        }
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeUnit> for String {
    fn from(unit: TimeUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// Configuration of the periodic schedule driving a run
///
/// One tick fires every `period` `unit`s; the batch-size policy decides how
/// many work-units each tick dispatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Schedule tick period (positive)
    pub period: u64,

    /// Time unit of the tick period
    pub unit: TimeUnit,
}

impl ScheduleConfig {
    /// Create a schedule config, rejecting a non-positive period
    pub fn new(period: u64, unit: TimeUnit) -> Result<Self, ConfigError> {
        let config = Self { period, unit };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period == 0 {
            return Err(ConfigError::InvalidPeriod(
                "schedule period must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The tick period as a [`Duration`]
    pub fn tick_period(&self) -> Duration {
        self.unit.to_duration(self.period)
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The time unit string does not name one of the five recognized units
    #[error("unsupported time unit: {0}. supported time units: MILLISECONDS, SECONDS, MINUTES, HOURS, DAYS")]
    UnsupportedTimeUnit(String),

    /// The schedule period is zero
    #[error("invalid schedule period: {0}")]
    InvalidPeriod(String),
}
