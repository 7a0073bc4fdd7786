//! Batch-size policy
//!
//! Pure computation, evaluated once per run (not per tick).

use crate::config::ScheduleConfig;
use crate::context::RunContext;

/// Number of work-units to dispatch per tick
///
/// If the caller's send period is strictly shorter than the schedule tick
/// period, the caller wants to push more than one unit per tick to hit its
/// target inside its own period: `ceil(total_count / send_period)`. Otherwise
/// one unit per tick. Always at least 1.
///
/// Periods are compared as raw values; both are expressed in the same unit
/// domain as the schedule.
pub fn batch_size(context: &RunContext, schedule: &ScheduleConfig) -> u64 {
    if context.send_period() < schedule.period {
        // send_period is guaranteed positive by RunContextBuilder
        context
            .total_count()
            .div_ceil(context.send_period())
            .max(1)
    } else {
        1
    }
}
