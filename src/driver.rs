//! Experiment driver: runs the trial matrix sequentially.

use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::report::TrialReporter;
use crate::store::SeatStore;
use crate::summary::TrialSummary;
use crate::trial::{TrialConfig, run_trial};
use std::time::Duration;
use tracing::{info, warn};

/// Drives an ordered list of trials against one seat store.
///
/// For each configuration: reset the store to its baseline, run the trial,
/// inspect the store for invariant violations (data, never a stop
/// condition), hand the summary to the reporter, pause, continue. Trials
/// never overlap. A reset failure aborts the whole experiment — later
/// trials could not be trusted against a dirty baseline.
pub struct ExperimentDriver {
    store: SeatStore,
    config: ExperimentConfig,
}

impl ExperimentDriver {
    /// Build a driver over a connected store and an experiment
    /// configuration. The configuration is owned and never mutated.
    #[must_use]
    pub const fn new(store: SeatStore, config: ExperimentConfig) -> Self {
        Self { store, config }
    }

    /// Run every configured trial in order and return all summaries.
    ///
    /// Each summary is also handed to `reporter` as soon as its trial
    /// completes. All configurations run unconditionally, even when an
    /// earlier trial exhibited double bookings.
    ///
    /// # Errors
    ///
    /// - [`ExperimentError::Reset`] if a baseline reset fails.
    /// - [`ExperimentError::Store`] if a post-trial inspection query fails.
    /// - [`ExperimentError::Report`] if the reporter cannot write a row.
    pub async fn run<R: TrialReporter>(
        &self,
        reporter: &mut R,
    ) -> Result<Vec<TrialSummary>, ExperimentError> {
        let mut summaries = Vec::with_capacity(self.config.trials.len());

        for (index, trial) in self.config.trials.iter().enumerate() {
            self.store
                .reset_event(self.config.event_id)
                .await
                .map_err(ExperimentError::Reset)?;

            info!(
                clients = trial.clients,
                isolation = trial.label(),
                "starting trial"
            );
            let outcomes = run_trial(
                &self.store,
                *trial,
                self.config.event_id,
                self.config.total_seats,
            )
            .await;

            let summary = TrialSummary::from_outcomes(*trial, &outcomes);
            self.inspect_trial(trial).await?;
            info!(
                successes = summary.success_count,
                failures = summary.failure_count,
                avg_ms = summary.avg_latency.as_millis(),
                "trial complete"
            );

            reporter.trial_completed(&summary)?;
            summaries.push(summary);

            let last = index + 1 == self.config.trials.len();
            if !last && self.config.trial_pause_secs > 0 {
                tokio::time::sleep(Duration::from_secs(self.config.trial_pause_secs)).await;
            }
        }

        Ok(summaries)
    }

    /// Post-trial look at the store: reserved-seat count and double-booked
    /// seats. A violation of the one-owner-per-seat invariant is exactly
    /// what weaker isolation levels are expected to produce sometimes, so
    /// it is logged and the run continues.
    async fn inspect_trial(&self, trial: &TrialConfig) -> Result<(), ExperimentError> {
        let reserved = self.store.reserved_seat_count(self.config.event_id).await?;
        let double_booked = self.store.double_booked_seats(self.config.event_id).await?;

        if double_booked.is_empty() {
            info!(reserved, isolation = trial.label(), "no double bookings observed");
        } else {
            warn!(
                reserved,
                isolation = trial.label(),
                seats = ?double_booked,
                "double booking observed"
            );
        }
        Ok(())
    }
}
