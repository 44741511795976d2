//! Generic listing rows
//!
//! Admin listings are described at runtime, so their rows are read as JSON
//! objects rather than typed models.

use serde_json::Value;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    pagination::{query::quote_ident, ListingQuery},
};

pub struct ListingRepository;

impl ListingRepository {
    /// Rows of one page of `query`
    pub async fn fetch_page(
        pool: &PgPool,
        query: &ListingQuery,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Value>> {
        let mut page_query = query.page_sql(offset, limit);
        let rows = page_query
            .build_query_scalar::<Value>()
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// One row of `table` by primary key
    pub async fn find_row(pool: &PgPool, table: &str, id: i64) -> AppResult<Option<Value>> {
        let sql = format!(
            "SELECT row_to_json(t) FROM (SELECT * FROM {} WHERE id = $1) t",
            quote_ident(table)
        );
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row)
    }
}
