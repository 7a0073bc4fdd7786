//! reqpacer - rate-controlled request load generator

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use reqpacer_core::{Producer, RunContext, Scheduler};

mod cli;
mod producers;
mod settings;

use cli::{Cli, Commands};
use producers::SyntheticProducer;
use settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    match cli.command {
        Commands::Run { config } => run(Path::new(&config)),
        Commands::Validate { config } => validate(Path::new(&config)),
    }
}

fn run(config: &Path) -> Result<()> {
    let settings = Settings::load(config)?;
    let scheduler = Scheduler::new(settings.schedule.clone())?;

    let producer = Arc::new(SyntheticProducer::new(&settings.producer));
    let context = RunContext::builder()
        .producer(producer.clone() as Arc<dyn Producer>)
        .send_period(settings.run.send_period)
        .send_time_unit(settings.run.send_unit)
        .total_count(settings.run.total_count)
        .build()?;

    // Process-wide worker pool: at least two workers so tick dispatch and
    // producer invocations run concurrently.
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .max(2);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?;

    let report = runtime.block_on(scheduler.produce(context))?;

    // Teardown cancels pending work instead of waiting for natural drain.
    runtime.shutdown_timeout(Duration::ZERO);

    tracing::info!(
        invocations = producer.invocations(),
        total_count = report.total_count(),
        "run finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn validate(config: &Path) -> Result<()> {
    let settings = Settings::load(config)?;
    Scheduler::new(settings.schedule.clone())?;

    // Vouch for the run settings too: a context that cannot be built here
    // would fail identically at `run`.
    RunContext::builder()
        .producer(Arc::new(SyntheticProducer::new(&settings.producer)) as Arc<dyn Producer>)
        .send_period(settings.run.send_period)
        .send_time_unit(settings.run.send_unit)
        .total_count(settings.run.total_count)
        .build()?;

    tracing::info!(
        period = settings.schedule.period,
        unit = %settings.schedule.unit,
        total_count = settings.run.total_count,
        "configuration OK"
    );
    println!("configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ProducerSettings;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_context_builds_from_synthetic_producer() {
        let producer = Arc::new(SyntheticProducer::new(&ProducerSettings::default()));
        let context = RunContext::builder()
            .producer(producer.clone() as Arc<dyn Producer>)
            .send_period(1)
            .total_count(10)
            .build()
            .unwrap();
        assert_eq!(context.producer().name(), "synthetic");
    }

    #[test]
    fn test_validate_accepts_valid_settings() {
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

        assert!(validate(file.path()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_send_period() {
        let file = write_settings(
            r#"
            [schedule]
            period = 1
            unit = "SECONDS"

            [run]
            total_count = 10
            send_period = 0
            send_unit = "SECONDS"
            "#,
        );

        let err = validate(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("send period"));
    }

    #[test]
    fn test_validate_rejects_zero_fail_every() {
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

        let err = validate(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("fail_every"));
    }
}
