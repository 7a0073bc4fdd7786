//! The work-unit capability trait
//!
//! The trait is defined in core so the engine never depends on a concrete
//! producer; implementations live with the caller.

use async_trait::async_trait;
use std::time::Duration;

/// A capability that performs one unit of work and reports success
///
/// The engine only calls `produce`; it never mutates or destroys the
/// capability. Implementations must be safe for concurrent invocation,
/// since batch sizes greater than one dispatch invocations in parallel.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Producer identifier, used in logs
    fn name(&self) -> &str;

    /// Perform one unit of work
    ///
    /// `Ok(true)` counts as a success toward the target, `Ok(false)` is a
    /// miss, and `Err` is recovered by the engine as a miss (logged, never
    /// retried, never propagated into aggregation).
    async fn produce(&self) -> Result<bool, ProduceError>;
}

/// Failures a producer may surface instead of a success indicator
#[derive(Debug, thiserror::Error)]
pub enum ProduceError {
    /// Sending the request failed
    #[error("send failed: {0}")]
    Send(String),

    /// The unit of work did not complete in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
