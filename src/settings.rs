//! Settings file loading
//!
//! The settings file is TOML:
//!
//! ```toml
//! [schedule]
//! period = 1
//! unit = "SECONDS"
//!
//! [run]
//! total_count = 100
//! send_period = 1
//! send_unit = "SECONDS"
//!
//! [producer]
//! latency_ms = 10
//! fail_every = 20
//! ```
//!
//! An unsupported time unit fails here, at load time, naming the offending
//! value and the supported set.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use reqpacer_core::{ScheduleConfig, TimeUnit};

/// Top-level settings file contents
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The process-wide schedule
    pub schedule: ScheduleConfig,

    /// Parameters of the run to execute
    pub run: RunSettings,

    /// Built-in producer behavior
    #[serde(default)]
    pub producer: ProducerSettings,
}

/// Run parameters from the settings file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Target number of successful invocations
    pub total_count: u64,

    /// Desired send period (same unit domain as the schedule)
    pub send_period: u64,

    /// Time unit of the send period
    pub send_unit: TimeUnit,
}

/// Built-in synthetic producer settings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProducerSettings {
    /// Simulated per-invocation latency in milliseconds (0 = none)
    pub latency_ms: u64,

    /// Every nth invocation reports a miss (None = always succeed)
    pub fail_every: Option<u64>,
}

impl Settings {
    /// Load and validate a settings file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        settings.schedule.validate()?;
        if settings.producer.fail_every == Some(0) {
            anyhow::bail!("producer fail_every must be positive");
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_settings() {
        let file = write_settings(
            r#"
            [schedule]
            period = 10
            unit = "MILLISECONDS"

            [run]
            total_count = 23
            send_period = 5
            send_unit = "MILLISECONDS"

            [producer]
            latency_ms = 2
            fail_every = 4
            "#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.schedule.period, 10);
        assert_eq!(settings.schedule.unit, TimeUnit::Milliseconds);
        assert_eq!(settings.run.total_count, 23);
        assert_eq!(settings.run.send_period, 5);
        assert_eq!(settings.producer.latency_ms, 2);
        assert_eq!(settings.producer.fail_every, Some(4));
    }

    #[test]
    fn test_load_defaults_producer_section() {
        let file = write_settings(
            r#"
            [schedule]
            period = 1
            unit = "SECONDS"

            [run]
            total_count = 10
            send_period = 1
            send_unit = "SECONDS"
            "#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.producer.latency_ms, 0);
        assert!(settings.producer.fail_every.is_none());
    }

    #[test]
    fn test_load_unsupported_time_unit() {
        let file = write_settings(
            r#"
            [schedule]
            period = 1
            unit = "FORTNIGHTS"

            [run]
            total_count = 10
            send_period = 1
            send_unit = "SECONDS"
            "#,
        );

        let err = Settings::load(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("FORTNIGHTS"), "unexpected error: {msg}");
    }

    #[test]
    fn test_load_zero_schedule_period() {
        let file = write_settings(
            r#"
            [schedule]
            period = 0
            unit = "SECONDS"

            [run]
            total_count = 10
            send_period = 1
            send_unit = "SECONDS"
            "#,
        );

        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn test_load_zero_fail_every() {
        let file = write_settings(
            r#"
            [schedule]
            period = 1
            unit = "SECONDS"

            [run]
            total_count = 10
            send_period = 1
            send_unit = "SECONDS"

            [producer]
            fail_every = 0
            "#,
        );

        let err = Settings::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("fail_every"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Settings::load(Path::new("/nonexistent/reqpacer.toml")).is_err());
    }
}
