//! A single client's reservation attempt.
//!
//! Wraps the store's transactional claim with wall-clock timing and turns
//! every resolution — commit, clean rejection, or database error — into an
//! [`AttemptOutcome`]. Errors never escape an attempt; the experiment
//! measures failure rates instead of eliminating them.

use crate::isolation::IsolationLevel;
use crate::store::SeatStore;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of one reservation attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptOutcome {
    /// Whether the claim committed.
    pub succeeded: bool,
    /// Wall-clock duration from transaction start to commit or rollback.
    pub latency: Duration,
}

/// Run one transactional claim and classify its resolution.
///
/// The latency clock starts before the transaction is opened (including
/// pool acquisition, which is part of what a real client would wait for)
/// and stops once the claim has committed or rolled back.
pub async fn attempt_reservation(
    store: &SeatStore,
    event_id: i32,
    seat_number: i32,
    client_id: &str,
    isolation: IsolationLevel,
) -> AttemptOutcome {
    let start = Instant::now();
    let result = store
        .claim_seat(event_id, seat_number, client_id, isolation)
        .await;
    let latency = start.elapsed();

    match result {
        Ok(()) => {
            debug!(client = client_id, seat = seat_number, "reservation committed");
            AttemptOutcome {
                succeeded: true,
                latency,
            }
        }
        Err(err) => {
            debug!(
                client = client_id,
                seat = seat_number,
                serialization_conflict = err.is_serialization_conflict(),
                error = %err,
                "reservation failed"
            );
            AttemptOutcome {
                succeeded: false,
                latency,
            }
        }
    }
}
