//! Concurrent seat-reservation stress harness for `PostgreSQL`.
//!
//! `seatbench` measures how transaction isolation levels behave under
//! contention: it drives N simulated clients that all try to claim seats
//! from a shared pool at the same time, classifies every attempt as a
//! success or failure with its latency, and aggregates the distribution
//! per isolation level.
//!
//! # Architecture
//!
//! ```text
//! ExperimentDriver
//!     │  (reset store, one trial per configuration, strictly sequential)
//!     ▼
//! Trial Runner ──spawns──► N concurrent reservation attempts
//!     │                        │  (one transaction each:
//!     │                        │   SELECT … FOR UPDATE → check → UPDATE
//!     ▼                        ▼   + INSERT reservation → COMMIT)
//! AttemptOutcome collection ◄──┘
//!     │
//!     ▼
//! TrialSummary (success/failure counts, mean latency)
//!     │
//!     ▼
//! Reporter (console table + CSV file)
//! ```
//!
//! Correctness of the claim path hinges entirely on the store's row
//! locking and isolation semantics: the harness never serializes attempts
//! itself. A double booking observed under a weak isolation level is a
//! valid experimental outcome, not a harness bug — the driver detects and
//! reports it as data.

pub mod attempt;
pub mod config;
pub mod driver;
pub mod error;
pub mod isolation;
pub mod report;
pub mod schema;
pub mod store;
pub mod summary;
pub mod trial;

pub use attempt::AttemptOutcome;
pub use config::{Config, ExperimentConfig, PostgresConfig};
pub use driver::ExperimentDriver;
pub use error::{ExperimentError, StoreError};
pub use isolation::IsolationLevel;
pub use report::{ConsoleReporter, TrialReporter};
pub use store::{SeatStatus, SeatStore};
pub use summary::TrialSummary;
pub use trial::TrialConfig;
