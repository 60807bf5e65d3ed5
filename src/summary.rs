//! Aggregation of raw attempt outcomes into a trial summary.

use crate::attempt::AttemptOutcome;
use crate::trial::TrialConfig;
use std::time::Duration;

/// Aggregated result of one trial — the unit handed to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSummary {
    /// Number of clients the trial was configured with.
    pub clients: u32,
    /// Isolation level label (SQL spelling).
    pub isolation_label: &'static str,
    /// Attempts that committed.
    pub success_count: u32,
    /// Attempts that failed for any reason.
    pub failure_count: u32,
    /// Arithmetic mean latency over all outcomes, successes and failures
    /// alike. Zero for an empty collection.
    pub avg_latency: Duration,
}

impl TrialSummary {
    /// Pure reduction over a trial's outcomes. Success and failure counts
    /// partition the collection exactly.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Client counts fit u32 by configuration
    pub fn from_outcomes(config: TrialConfig, outcomes: &[AttemptOutcome]) -> Self {
        let success_count = outcomes.iter().filter(|o| o.succeeded).count() as u32;
        let failure_count = outcomes.len() as u32 - success_count;
        let total: Duration = outcomes.iter().map(|o| o.latency).sum();
        let avg_latency = if outcomes.is_empty() {
            Duration::ZERO
        } else {
            total / outcomes.len() as u32
        };

        Self {
            clients: config.clients,
            isolation_label: config.label(),
            success_count,
            failure_count,
            avg_latency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isolation::IsolationLevel;

    fn outcome(succeeded: bool, millis: u64) -> AttemptOutcome {
        AttemptOutcome {
            succeeded,
            latency: Duration::from_millis(millis),
        }
    }

    #[test]
    fn counts_partition_the_outcomes() {
        let outcomes: Vec<AttemptOutcome> = (1..=10)
            .map(|i| outcome(i <= 7, i * 10))
            .collect();
        let summary = TrialSummary::from_outcomes(
            TrialConfig::new(10, IsolationLevel::ReadCommitted),
            &outcomes,
        );

        assert_eq!(summary.success_count, 7);
        assert_eq!(summary.failure_count, 3);
        assert_eq!(summary.success_count + summary.failure_count, 10);
        // Mean of 10, 20, ..., 100 ms.
        assert_eq!(summary.avg_latency, Duration::from_millis(55));
    }

    #[test]
    fn failures_count_toward_the_mean() {
        let outcomes = [outcome(true, 30), outcome(false, 10)];
        let summary = TrialSummary::from_outcomes(
            TrialConfig::new(2, IsolationLevel::Serializable),
            &outcomes,
        );
        assert_eq!(summary.avg_latency, Duration::from_millis(20));
    }

    #[test]
    fn empty_collection_yields_zero_average() {
        let summary = TrialSummary::from_outcomes(
            TrialConfig::new(5, IsolationLevel::RepeatableRead),
            &[],
        );
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 0);
        assert_eq!(summary.avg_latency, Duration::ZERO);
    }

    #[test]
    fn summary_carries_the_trial_label() {
        let summary = TrialSummary::from_outcomes(
            TrialConfig::new(5, IsolationLevel::RepeatableRead),
            &[outcome(true, 1)],
        );
        assert_eq!(summary.clients, 5);
        assert_eq!(summary.isolation_label, "REPEATABLE READ");
    }
}
