//! Schema bootstrap for the seats and reservations tables.
//!
//! Applied once at startup, before any trial runs; a failure here is fatal
//! to the whole process. All statements are idempotent so repeated runs
//! against the same database are safe.

use crate::error::StoreError;
use crate::store::SeatStatus;
use sqlx::PgPool;

/// Create the seats and reservations tables plus supporting indexes.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if any DDL statement fails.
pub async fn apply(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS seats (
            id BIGSERIAL PRIMARY KEY,
            event_id INT NOT NULL,
            seat_number INT NOT NULL,
            status TEXT NOT NULL DEFAULT 'available',
            UNIQUE (event_id, seat_number)
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS reservations (
            id BIGSERIAL PRIMARY KEY,
            client_id TEXT NOT NULL,
            seat_id BIGINT NOT NULL REFERENCES seats(id),
            outcome TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reservations_seat ON reservations(seat_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Seed the seat pool for an event: one row per seat number in
/// `[1, total_seats]`, all available. Existing rows are left untouched, so
/// seeding is idempotent and never un-reserves a seat.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the insert fails.
pub async fn seed_seats(pool: &PgPool, event_id: i32, total_seats: i32) -> Result<(), StoreError> {
    sqlx::query(
        r"
        INSERT INTO seats (event_id, seat_number, status)
        SELECT $1, n, $3 FROM generate_series(1, $2) AS n
        ON CONFLICT (event_id, seat_number) DO NOTHING
        ",
    )
    .bind(event_id)
    .bind(total_seats)
    .bind(SeatStatus::Available.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
