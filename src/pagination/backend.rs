//! Row counting against the storage engine

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::{error::CountError, query::ListingQuery};

/// Storage engine operations used to count listing rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountBackend: Send + Sync {
    /// Planner statistics estimate for a whole table, never scans it.
    /// May be negative when the table was never analyzed.
    async fn estimate_table_rows(&self, table: &str) -> Result<i64, CountError>;

    /// Exact count of the rows matching `query`, cancelled after `timeout`.
    ///
    /// A cancelled or failed count is reported as `CountError::Aborted`;
    /// other variants mean the count never started.
    async fn bounded_count(&self, query: &ListingQuery, timeout: Duration) -> Result<i64, CountError>;
}

/// Postgres count backend
#[derive(Clone)]
pub struct PgCountBackend {
    pool: PgPool,
}

impl PgCountBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountBackend for PgCountBackend {
    async fn estimate_table_rows(&self, table: &str) -> Result<i64, CountError> {
        let reltuples: Option<f32> =
            sqlx::query_scalar(r#"SELECT reltuples FROM pg_class WHERE relname = $1"#)
                .bind(table)
                .fetch_optional(&self.pool)
                .await?;

        let reltuples = reltuples.ok_or_else(|| CountError::UnknownTable(table.to_string()))?;
        debug!(table = %table, reltuples = %reltuples, "Table statistics estimate");

        Ok(reltuples as i64)
    }

    async fn bounded_count(&self, query: &ListingQuery, timeout: Duration) -> Result<i64, CountError> {
        let mut tx = self.pool.begin().await?;

        let outcome = async {
            sqlx::query(&format!("SET LOCAL statement_timeout TO {}", timeout.as_millis()))
                .execute(&mut *tx)
                .await?;
            let mut count_query = query.count_sql();
            count_query
                .build_query_scalar::<i64>()
                .fetch_one(&mut *tx)
                .await
        }
        .await;

        // Read-only work, nothing to keep
        let rollback = tx.rollback().await;

        settle_count(outcome, rollback)
    }
}

/// Outcome of a bounded count once its transaction is closed.
///
/// The transaction never writes, so a failed rollback cannot undo anything
/// and does not void a finished count.
fn settle_count(
    outcome: Result<i64, sqlx::Error>,
    rollback: Result<(), sqlx::Error>,
) -> Result<i64, CountError> {
    if let Err(err) = rollback {
        warn!(error = %err, "Rollback of count transaction failed");
    }
    outcome.map_err(CountError::aborted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pagination::{Predicate, SqlValue},
        test_utils::containers::migrated_pool,
    };

    #[test]
    fn test_failed_rollback_keeps_finished_count() {
        let count = settle_count(Ok(42), Err(sqlx::Error::PoolClosed)).unwrap();
        assert_eq!(count, 42);
    }

    #[test]
    fn test_failed_count_is_aborted_whatever_the_rollback() {
        assert!(matches!(
            settle_count(Err(sqlx::Error::PoolTimedOut), Ok(())),
            Err(CountError::Aborted { timed_out: false, .. })
        ));
        assert!(matches!(
            settle_count(Err(sqlx::Error::PoolTimedOut), Err(sqlx::Error::PoolClosed)),
            Err(CountError::Aborted { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_postgres_counts() {
        let pool = migrated_pool().await;
        let contest_id: i64 = sqlx::query_scalar(
            "INSERT INTO contests (title, slug, host, start_time, end_time) \
             VALUES ('Backend Round', 'backend-round', 'example.org', NOW(), NOW()) RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO statistics (contest_id, account, place) \
             SELECT $1, 'user' || n, n FROM generate_series(1, 25) AS n",
        )
        .bind(contest_id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("ANALYZE statistics").execute(&pool).await.unwrap();

        let backend = PgCountBackend::new(pool.clone());

        let estimate = backend.estimate_table_rows("statistics").await.unwrap();
        assert!(estimate >= 25);

        let query = ListingQuery::new("statistics")
            .filter(Predicate::eq("contest_id", SqlValue::Int(contest_id)))
            .filter(Predicate::Any(vec![Predicate::icontains("account", "USER1")]));
        // user1, user10..user19
        let count = backend.bounded_count(&query, Duration::from_secs(2)).await.unwrap();
        assert_eq!(count, 11);

        assert!(matches!(
            backend.estimate_table_rows("no_such_table").await,
            Err(CountError::UnknownTable(_))
        ));
    }
}
