//! reqpacer-core: scheduling and aggregation engine for rate-controlled
//! request production
//!
//! This crate provides the engine that drives a load-generation run:
//!
//! - The [`Producer`] capability trait (one unit of work, success/failure)
//! - Run configuration ([`ScheduleConfig`], [`RunContext`])
//! - The [`Scheduler`]: periodic tick dispatch, batch fan-out, serialized
//!   result aggregation, and deterministic termination
//! - The final [`Report`] handed back to the caller

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod traits;

pub use config::{ConfigError, ScheduleConfig, TimeUnit};
pub use context::{RunContext, RunContextBuilder};
pub use error::{Error, Result};
pub use report::Report;
pub use scheduler::{batch_size, Completion, Scheduler};
pub use traits::{ProduceError, Producer};
