//! Tournament error types.

use std::time::Duration;
use thiserror::Error;

use crate::db::timeouts::TimeoutError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store operation did not finish in time
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Store rejected a write (missing or foreign player, duplicate side)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Caller passed an identifier or value no operation can act on
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TournamentError {
    /// Whether this error came from reading or writing the store.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            TournamentError::Database(_)
                | TournamentError::Timeout(_)
                | TournamentError::ConstraintViolation(_)
        )
    }

    /// Get a client-safe error message that doesn't leak SQL details
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Internal storage error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<TimeoutError> for TournamentError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(duration) => TournamentError::Timeout(duration),
            TimeoutError::Database(e) => TournamentError::Database(e),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Reject identifiers that cannot name a stored row.
pub(crate) fn ensure_id(kind: &str, id: i64) -> TournamentResult<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(TournamentError::InvalidArgument(format!(
            "{kind} id must be positive, got {id}"
        )))
    }
}

/// Trim a display name or title, rejecting blank input.
pub(crate) fn ensure_name(kind: &str, value: &str) -> TournamentResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidArgument(format!(
            "{kind} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
