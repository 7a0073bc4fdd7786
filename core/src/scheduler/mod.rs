//! The scheduling and aggregation engine
//!
//! The [`Scheduler`] owns the run lifecycle: it computes the batch size once,
//! drives a periodic tick loop, fans each tick out into concurrent producer
//! invocations, serializes result aggregation behind a per-run lock, and
//! resolves a one-shot [`Completion`] signal exactly once when the target
//! count is reached.
//!
//! One run moves through `Idle -> Ticking -> Draining -> Completed`: the tick
//! loop stops the instant the threshold is crossed, batches already in flight
//! drain through aggregation harmlessly, and the caller's `produce` call
//! resolves with the final report.

mod batch;
mod completion;
mod executor;

pub use batch::batch_size;
pub use completion::Completion;
pub use executor::Scheduler;
