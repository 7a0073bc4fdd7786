//! Built-in producers for the binary
//!
//! The engine treats the producer as an opaque capability; real deployments
//! implement [`Producer`] against whatever system they are loading. The
//! synthetic producer here simulates that work so the tool runs end-to-end
//! from a settings file.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use reqpacer_core::{ProduceError, Producer};

use crate::settings::ProducerSettings;

/// Producer that simulates one request with optional latency and a
/// deterministic miss pattern
pub struct SyntheticProducer {
    latency: Option<Duration>,
    fail_every: Option<u64>,
    invocations: AtomicU64,
}

impl SyntheticProducer {
    /// Create a synthetic producer from settings
    pub fn new(settings: &ProducerSettings) -> Self {
        let latency = match settings.latency_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        Self {
            latency,
            // Zero means "never fail"; the remainder check below needs n > 0.
            fail_every: settings.fail_every.filter(|&n| n > 0),
            invocations: AtomicU64::new(0),
        }
    }

    /// Number of invocations so far
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Producer for SyntheticProducer {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn produce(&self) -> Result<bool, ProduceError> {
        let count = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(n) = self.fail_every {
            if count % n == 0 {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthetic_producer_succeeds() {
        let producer = SyntheticProducer::new(&ProducerSettings::default());
        assert!(producer.produce().await.unwrap());
        assert_eq!(producer.invocations(), 1);
    }

    #[tokio::test]
    async fn test_synthetic_producer_zero_fail_every_never_fails() {
        let settings = ProducerSettings {
            latency_ms: 0,
            fail_every: Some(0),
        };
        let producer = SyntheticProducer::new(&settings);

        for _ in 0..4 {
            assert!(producer.produce().await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_synthetic_producer_fail_every() {
        let settings = ProducerSettings {
            latency_ms: 0,
            fail_every: Some(3),
        };
        let producer = SyntheticProducer::new(&settings);

        let mut results = Vec::new();
        for _ in 0..6 {
            results.push(producer.produce().await.unwrap());
        }
        assert_eq!(results, vec![true, true, false, true, true, false]);
    }
}
