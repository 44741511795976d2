//! Standings row repository

use sqlx::PgPool;

use crate::{error::AppResult, models::Statistic};

/// Repository for standings rows
pub struct StatisticRepository;

impl StatisticRepository {
    /// Find rows by IDs, in the order the IDs were given
    pub async fn find_by_ids(pool: &PgPool, ids: &[i64]) -> AppResult<Vec<Statistic>> {
        let rows = sqlx::query_as::<_, Statistic>(
            r#"
            SELECT s.* FROM statistics s
            JOIN UNNEST($1::BIGINT[]) WITH ORDINALITY AS ids(id, position) ON ids.id = s.id
            ORDER BY ids.position
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
