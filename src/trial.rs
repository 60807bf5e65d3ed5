//! One trial: N concurrent reservation attempts under one isolation level.

use crate::attempt::{AttemptOutcome, attempt_reservation};
use crate::isolation::IsolationLevel;
use crate::store::SeatStore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Configuration of a single trial: how many concurrent clients, and at
/// which isolation level their transactions run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Number of concurrent simulated clients. Must be greater than zero.
    pub clients: u32,
    /// Isolation level for every attempt in the trial.
    pub isolation: IsolationLevel,
}

impl TrialConfig {
    /// Build a trial configuration.
    #[must_use]
    pub const fn new(clients: u32, isolation: IsolationLevel) -> Self {
        Self { clients, isolation }
    }

    /// Human-readable label for reports: the isolation level's SQL name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.isolation.as_sql()
    }
}

/// Run one trial: spawn exactly `config.clients` concurrent attempts, wait
/// for all of them, and return every outcome.
///
/// Each task independently picks a seat number uniformly at random from
/// `[1, total_seats]` — collisions are expected and are the point of the
/// test. The runner imposes no ordering of its own: serialization, if any,
/// comes entirely from the store's locking and isolation behavior.
/// Outcomes flow back through a buffered channel sized to the client
/// count; draining it until every sender is gone is the join barrier, so
/// exactly one outcome per client is collected and none is dropped.
pub async fn run_trial(
    store: &SeatStore,
    config: TrialConfig,
    event_id: i32,
    total_seats: i32,
) -> Vec<AttemptOutcome> {
    let capacity = config.clients.max(1) as usize;
    let (sender, mut receiver) = mpsc::channel::<AttemptOutcome>(capacity);

    for client in 1..=config.clients {
        let store = store.clone();
        let sender = sender.clone();
        let isolation = config.isolation;

        tokio::spawn(async move {
            let client_id = format!("client_{client}");
            // ThreadRng is not Send, so the pick happens before any await.
            let seat_number = {
                let mut rng = rand::thread_rng();
                rng.gen_range(1..=total_seats)
            };
            let outcome =
                attempt_reservation(&store, event_id, seat_number, &client_id, isolation).await;
            let _ = sender.send(outcome).await;
        });
    }
    drop(sender);

    let mut outcomes = Vec::with_capacity(capacity);
    while let Some(outcome) = receiver.recv().await {
        outcomes.push(outcome);
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_the_isolation_sql_name() {
        let trial = TrialConfig::new(20, IsolationLevel::Serializable);
        assert_eq!(trial.label(), "SERIALIZABLE");
    }
}
