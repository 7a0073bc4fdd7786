//! Run context: the immutable per-run input bundle

use std::fmt;
use std::sync::Arc;

use crate::config::TimeUnit;
use crate::error::{Error, Result};
use crate::traits::Producer;

/// Immutable input bundle for one run
///
/// Bundles the work-unit capability, the target total count, and the caller's
/// desired send period (same unit domain as the schedule). Built through
/// [`RunContextBuilder`], which enforces the caller contract before any
/// scheduling begins.
#[derive(Clone)]
pub struct RunContext {
    producer: Arc<dyn Producer>,
    send_period: u64,
    send_time_unit: TimeUnit,
    total_count: u64,
}

impl RunContext {
    /// Start building a run context
    pub fn builder() -> RunContextBuilder {
        RunContextBuilder::new()
    }

    /// The work-unit capability
    pub fn producer(&self) -> &Arc<dyn Producer> {
        &self.producer
    }

    /// The caller's desired send period (always positive)
    pub fn send_period(&self) -> u64 {
        self.send_period
    }

    /// Time unit of the send period
    pub fn send_time_unit(&self) -> TimeUnit {
        self.send_time_unit
    }

    /// Target number of successful invocations
    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("producer", &self.producer.name())
            .field("send_period", &self.send_period)
            .field("send_time_unit", &self.send_time_unit)
            .field("total_count", &self.total_count)
            .finish()
    }
}

/// Builder for [`RunContext`] with contract validation
pub struct RunContextBuilder {
    producer: Option<Arc<dyn Producer>>,
    send_period: Option<u64>,
    send_time_unit: TimeUnit,
    total_count: Option<u64>,
}

impl RunContextBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            producer: None,
            send_period: None,
            send_time_unit: TimeUnit::Seconds,
            total_count: None,
        }
    }

    /// Set the work-unit capability
    pub fn producer(mut self, producer: Arc<dyn Producer>) -> Self {
        self.producer = Some(producer);
        self
    }

    /// Set the desired send period
    pub fn send_period(mut self, period: u64) -> Self {
        self.send_period = Some(period);
        self
    }

    /// Set the time unit of the send period (defaults to SECONDS)
    pub fn send_time_unit(mut self, unit: TimeUnit) -> Self {
        self.send_time_unit = unit;
        self
    }

    /// Set the target number of successful invocations
    pub fn total_count(mut self, count: u64) -> Self {
        self.total_count = Some(count);
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns [`Error::InvalidContext`] if the producer is missing, the send
    /// period is missing or zero, or the total count is missing. A zero send
    /// period is rejected here so the batch-size policy never divides by zero.
    pub fn build(self) -> Result<RunContext> {
        let producer = self.producer.ok_or_else(|| Error::missing("producer"))?;
        let send_period = self
            .send_period
            .ok_or_else(|| Error::missing("send_period"))?;
        let total_count = self
            .total_count
            .ok_or_else(|| Error::missing("total_count"))?;

        if send_period == 0 {
            return Err(Error::InvalidContext(
                "send period must be positive".into(),
            ));
        }

        Ok(RunContext {
            producer,
            send_period,
            send_time_unit: self.send_time_unit,
            total_count,
        })
    }
}

impl Default for RunContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
