//! Pagination error types

/// Postgres SQLSTATE raised when `statement_timeout` cancels a query
const QUERY_CANCELED: &str = "57014";

/// Failures while estimating a listing count.
///
/// None of these reach the caller of `CachingPaginator::count`; they pick
/// which degraded value is returned instead.
#[derive(Debug, thiserror::Error)]
pub enum CountError {
    /// The exact count was cancelled by the statement timeout or failed
    #[error("count aborted (timed out: {timed_out}): {message}")]
    Aborted { timed_out: bool, message: String },

    #[error("no statistics for table: {0}")]
    UnknownTable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(String),
}

impl CountError {
    /// Classify an error raised by the count statement itself
    pub fn aborted(err: sqlx::Error) -> Self {
        let timed_out = matches!(
            &err,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(QUERY_CANCELED)
        );
        Self::Aborted {
            timed_out,
            message: err.to_string(),
        }
    }
}

impl From<redis::RedisError> for CountError {
    fn from(err: redis::RedisError) -> Self {
        CountError::Cache(err.to_string())
    }
}

/// Invalid page requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("That page number is not an integer")]
    NotAnInteger,

    #[error("That page number is less than 1")]
    LessThanOne,

    #[error("That page contains no results")]
    NoResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aborted_without_database_code_is_not_timeout() {
        let err = CountError::aborted(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CountError::Aborted { timed_out: false, .. }));
    }
}
