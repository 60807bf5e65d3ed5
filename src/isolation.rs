//! Transaction isolation levels understood by the harness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Isolation level requested for a reservation transaction.
///
/// The level is threaded through every reservation attempt as a typed
/// variant; the store turns it into the corresponding
/// `SET TRANSACTION ISOLATION LEVEL` statement right after `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    /// `PostgreSQL` `READ COMMITTED` (the server default).
    ReadCommitted,
    /// `PostgreSQL` `REPEATABLE READ`.
    RepeatableRead,
    /// `PostgreSQL` `SERIALIZABLE`. Commits may be rejected with a
    /// serialization failure (SQLSTATE 40001) instead of blocking.
    Serializable,
}

impl IsolationLevel {
    /// SQL spelling of the level, also used as the report label.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }

    /// Statement applied to a freshly opened transaction.
    #[must_use]
    pub const fn set_transaction_sql(self) -> &'static str {
        match self {
            Self::ReadCommitted => "SET TRANSACTION ISOLATION LEVEL READ COMMITTED",
            Self::RepeatableRead => "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ",
            Self::Serializable => "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE",
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_spelling_matches_postgres() {
        assert_eq!(IsolationLevel::ReadCommitted.as_sql(), "READ COMMITTED");
        assert_eq!(IsolationLevel::RepeatableRead.as_sql(), "REPEATABLE READ");
        assert_eq!(IsolationLevel::Serializable.as_sql(), "SERIALIZABLE");
    }

    #[test]
    fn set_statement_embeds_the_level() {
        for level in [
            IsolationLevel::ReadCommitted,
            IsolationLevel::RepeatableRead,
            IsolationLevel::Serializable,
        ] {
            let stmt = level.set_transaction_sql();
            assert!(stmt.starts_with("SET TRANSACTION ISOLATION LEVEL "));
            assert!(stmt.ends_with(level.as_sql()));
        }
    }

    #[test]
    fn display_uses_sql_spelling() {
        assert_eq!(IsolationLevel::Serializable.to_string(), "SERIALIZABLE");
    }
}
