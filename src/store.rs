//! Seat store access over a `PostgreSQL` connection pool.
//!
//! [`SeatStore`] is the only gateway to shared mutable state. The claim
//! path runs as a single transaction at the caller's isolation level:
//! locked read (`SELECT … FOR UPDATE`), status check, status write,
//! reservation insert, commit. Everything else — baseline reset between
//! trials and the post-trial invariant queries — runs outside any
//! transaction.

use crate::config::PostgresConfig;
use crate::error::StoreError;
use crate::isolation::IsolationLevel;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;

/// Lifecycle state of a seat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    /// The seat can still be claimed.
    Available,
    /// A successful reservation owns the seat.
    Reserved,
}

impl SeatStatus {
    /// Convert status to its database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
        }
    }

    /// Parse status from its database string representation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidStatus`] if the string doesn't match a
    /// known status.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            _ => Err(StoreError::InvalidStatus(s.to_string())),
        }
    }
}

/// Outcome marker stored on successful reservation rows.
const RESERVATION_SUCCESSFUL: &str = "successful";

/// Transactional access to the seats and reservations tables.
///
/// Cloning is cheap: the pool is reference-counted, and each clone is
/// handed to one concurrent client task during a trial.
#[derive(Clone)]
pub struct SeatStore {
    pool: PgPool,
}

impl SeatStore {
    /// Connect to `PostgreSQL` and verify the connection with a ping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the pool cannot be created or
    /// the ping fails.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect(&config.url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests that provision their own).
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transaction at the requested isolation level.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if `BEGIN` or the isolation
    /// statement fails.
    pub async fn begin(
        &self,
        isolation: IsolationLevel,
    ) -> Result<Transaction<'static, Postgres>, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(isolation.set_transaction_sql())
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Attempt to claim one seat for a client, as a single transaction.
    ///
    /// Reads the seat row under an exclusive row lock, so a concurrent
    /// claim of the same seat blocks here until the winner resolves and
    /// then observes the updated status. Under `SERIALIZABLE` the commit
    /// itself may instead be rejected with a serialization failure; that
    /// surfaces as [`StoreError::Database`] like any other conflict.
    ///
    /// # Errors
    ///
    /// - [`StoreError::SeatNotFound`] if the seat row does not exist.
    /// - [`StoreError::SeatUnavailable`] if the seat is already claimed;
    ///   the transaction is rolled back.
    /// - [`StoreError::Database`] on lock, write, or commit failure; any
    ///   partial work is rolled back when the transaction drops.
    pub async fn claim_seat(
        &self,
        event_id: i32,
        seat_number: i32,
        client_id: &str,
        isolation: IsolationLevel,
    ) -> Result<(), StoreError> {
        let mut tx = self.begin(isolation).await?;

        let seat: Option<(i64, String)> = sqlx::query_as(
            r"
            SELECT id, status
            FROM seats
            WHERE event_id = $1 AND seat_number = $2
            FOR UPDATE
            ",
        )
        .bind(event_id)
        .bind(seat_number)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((seat_id, status)) = seat else {
            return Err(StoreError::SeatNotFound {
                event_id,
                seat_number,
            });
        };

        if SeatStatus::parse(&status)? != SeatStatus::Available {
            tx.rollback().await?;
            return Err(StoreError::SeatUnavailable { seat_number });
        }

        sqlx::query("UPDATE seats SET status = $1 WHERE id = $2")
            .bind(SeatStatus::Reserved.as_str())
            .bind(seat_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO reservations (client_id, seat_id, outcome) VALUES ($1, $2, $3)")
            .bind(client_id)
            .bind(seat_id)
            .bind(RESERVATION_SUCCESSFUL)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Restore the baseline for an event: every seat available, zero
    /// reservations. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if either bulk statement fails.
    pub async fn reset_event(&self, event_id: i32) -> Result<(), StoreError> {
        sqlx::query("UPDATE seats SET status = $1 WHERE event_id = $2")
            .bind(SeatStatus::Available.as_str())
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "DELETE FROM reservations WHERE seat_id IN (SELECT id FROM seats WHERE event_id = $1)",
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of seats currently in the `reserved` state for an event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn reserved_seat_count(&self, event_id: i32) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM seats WHERE event_id = $1 AND status = $2")
                .bind(event_id)
                .bind(SeatStatus::Reserved.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Number of reservation rows recorded for an event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn reservation_count(&self, event_id: i32) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM reservations r
            JOIN seats s ON s.id = r.seat_id
            WHERE s.event_id = $1
            ",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Seat numbers owned by more than one successful reservation — the
    /// invariant violation the experiment exists to detect. Empty under
    /// correct serialization; non-empty is data, not a harness error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the query fails.
    pub async fn double_booked_seats(&self, event_id: i32) -> Result<Vec<i32>, StoreError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r"
            SELECT s.seat_number
            FROM seats s
            JOIN reservations r ON r.seat_id = s.id
            WHERE s.event_id = $1 AND r.outcome = $2
            GROUP BY s.seat_number
            HAVING COUNT(*) > 1
            ORDER BY s.seat_number
            ",
        )
        .bind(event_id)
        .bind(RESERVATION_SUCCESSFUL)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(seat_number,)| seat_number).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_db_strings() {
        for status in [SeatStatus::Available, SeatStatus::Reserved] {
            assert_eq!(SeatStatus::parse(status.as_str()).ok(), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            SeatStatus::parse("sold"),
            Err(StoreError::InvalidStatus(s)) if s == "sold"
        ));
    }
}
