//! Contest repository

use sqlx::PgPool;

use crate::{error::AppResult, models::Contest};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// Find the most recent contest with the given slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE slug = $1
            ORDER BY start_time DESC
            LIMIT 1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(contest)
    }

    /// Find contests by IDs, missing ones are skipped
    pub async fn find_by_ids(pool: &PgPool, ids: &[i64]) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE id = ANY($1)
            ORDER BY start_time DESC, id DESC
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }
}
