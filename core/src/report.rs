//! The run report
//!
//! One report belongs to exactly one run. Only the aggregation step of that
//! run mutates it; once the run's completion signal fires the caller receives
//! a read-only snapshot.

use serde::Serialize;

/// Accumulated result of one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    total_count: u64,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Total successful invocations so far (monotonically non-decreasing)
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Add a batch's contribution to the total
    pub fn update_total_count(&mut self, count: u64) {
        self.total_count += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_starts_at_zero() {
        assert_eq!(Report::new().total_count(), 0);
    }

    #[test]
    fn test_report_accumulates() {
        let mut report = Report::new();
        report.update_total_count(3);
        report.update_total_count(0);
        report.update_total_count(4);
        assert_eq!(report.total_count(), 7);
    }

    #[test]
    fn test_report_serialization() {
        let mut report = Report::new();
        report.update_total_count(23);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"total_count":23}"#);
    }
}
