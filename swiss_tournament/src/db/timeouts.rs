//! Database query timeout helpers
//!
//! Provides timeout wrappers for store operations to prevent indefinite hangs.

use std::time::Duration;
use tokio::time::timeout;

use crate::tournament::{TournamentError, TournamentResult};

/// Default timeout for database queries (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for transactions (10 seconds)
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for timeout operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError {
    /// Operation timed out
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for timeout operations
pub type TimeoutResult<T> = Result<T, TimeoutError>;

/// Execute a query with timeout
///
/// # Example
///
/// ```no_run
/// use swiss_tournament::db::timeouts::{with_timeout, DEFAULT_QUERY_TIMEOUT};
/// # use sqlx::PgPool;
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
///
/// let result = with_timeout(
///     DEFAULT_QUERY_TIMEOUT,
///     sqlx::query("SELECT * FROM players WHERE tournament_id = $1")
///         .bind(1_i64)
///         .fetch_all(pool)
/// ).await?;
///
/// # Ok(())
/// # }
/// ```
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> TimeoutResult<T>
where
    F: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(duration, future).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(TimeoutError::Database(e)),
        Err(_) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Execute a query with default timeout (5 seconds)
pub async fn with_default_timeout<F, T>(future: F) -> TimeoutResult<T>
where
    F: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(DEFAULT_QUERY_TIMEOUT, future).await
}

/// Run a whole transaction body under the transaction timeout (10 seconds)
///
/// When the deadline passes the body future is dropped, which drops any open
/// `sqlx::Transaction` inside it and rolls it back.
pub async fn with_transaction_timeout<F, T>(future: F) -> TournamentResult<T>
where
    F: std::future::Future<Output = TournamentResult<T>>,
{
    timeout(DEFAULT_TRANSACTION_TIMEOUT, future)
        .await
        .unwrap_or(Err(TournamentError::Timeout(DEFAULT_TRANSACTION_TIMEOUT)))
}
