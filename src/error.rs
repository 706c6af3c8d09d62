//! Store-layer error taxonomy.
//!
//! Failures are propagated to the caller, never masked as empty results.
//! A missing record is a distinct outcome from a failed query so that the
//! API layer can answer 404 instead of 500.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The corpus store cannot be reached at all (pool closed, file gone).
    #[error("corpus store unavailable")]
    Unavailable(#[source] anyhow::Error),

    /// The store was reachable but the operation failed.
    #[error("corpus store query failed")]
    Query(#[source] anyhow::Error),

    /// Lookup by identifier matched no record.
    #[error("text {0} not found")]
    NotFound(i64),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.into())
            }
            _ => StoreError::Query(e.into()),
        }
    }
}
