//! Error taxonomy for the harness.
//!
//! Two tiers: [`StoreError`] covers everything a single store operation can
//! fail with (per-attempt errors end up swallowed into outcome data by the
//! trial runner), while [`ExperimentError`] covers the fatal paths of the
//! experiment driver — a reset or report failure terminates the run because
//! later trials could no longer be trusted.

use sqlx::error::DatabaseError;
use thiserror::Error;

/// Errors from seat store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No seat row exists for the (event, seat number) pair.
    #[error("seat {seat_number} not found for event {event_id}")]
    SeatNotFound {
        /// Event the seat was looked up under.
        event_id: i32,
        /// Requested seat number.
        seat_number: i32,
    },

    /// The seat row exists but is not in the `available` state.
    #[error("seat {seat_number} is not available")]
    SeatUnavailable {
        /// Seat number that was already claimed.
        seat_number: i32,
    },

    /// A status column held a value outside the known lifecycle.
    #[error("invalid seat status: {0}")]
    InvalidStatus(String),

    /// Underlying database failure: connection loss, lock acquisition
    /// error, or a commit rejected with a serialization conflict.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether this error is a `PostgreSQL` serialization failure
    /// (SQLSTATE 40001), the rejection `SERIALIZABLE` transactions can
    /// receive at commit time. Used for labelling only; the harness never
    /// retries (see DESIGN.md).
    #[must_use]
    pub fn is_serialization_conflict(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .and_then(DatabaseError::code)
                .is_some_and(|code| code == "40001"),
            _ => false,
        }
    }
}

/// Fatal errors of the experiment driver and its collaborators.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// Schema bootstrap or seat-pool seeding failed before any trial ran.
    #[error("store setup failed: {0}")]
    Setup(StoreError),

    /// Baseline reset between trials failed; subsequent trials cannot be
    /// trusted, so the whole experiment aborts.
    #[error("store reset failed: {0}")]
    Reset(StoreError),

    /// A non-reset store operation outside any attempt failed.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Report output could not be produced. In-memory summaries remain
    /// valid; only the rendering failed.
    #[error("report output failed: {0}")]
    Report(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_unavailable_is_not_a_serialization_conflict() {
        let err = StoreError::SeatUnavailable { seat_number: 7 };
        assert!(!err.is_serialization_conflict());
    }

    #[test]
    fn display_names_the_seat() {
        let err = StoreError::SeatNotFound {
            event_id: 1,
            seat_number: 99,
        };
        assert_eq!(err.to_string(), "seat 99 not found for event 1");
    }

    #[test]
    fn reset_errors_stay_distinguishable() {
        let err = ExperimentError::Reset(StoreError::SeatUnavailable { seat_number: 3 });
        assert!(err.to_string().starts_with("store reset failed"));
    }
}
