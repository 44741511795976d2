//! Approximate-count paginator
//!
//! `SELECT COUNT(*)` over a large listing is slow, so the total is
//! estimated once and cached for an hour. Page numbers can drift from the
//! real data while an entry lives; that is accepted.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PaginationConfig;

use super::{
    backend::CountBackend,
    cache::{count_cache_key, CountCache},
    error::{CountError, PageError},
    query::ListingQuery,
};

/// How counts are computed and how long they are trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl From<&PaginationConfig> for CountOptions {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            cache_ttl: config.count_cache_ttl(),
            timeout: config.count_timeout(),
        }
    }
}

impl Default for CountOptions {
    fn default() -> Self {
        Self::from(&PaginationConfig::default())
    }
}

/// Result of one count attempt
enum Counted {
    /// Safe to share through the cache
    Known(u64),
    /// The bounded count was cancelled, reported as zero and kept local
    Aborted,
}

/// Position of one page within the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
    /// 1-based index of the first row on the page, 0 for an empty listing
    pub start_index: u64,
    pub end_index: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Rows skipped before this page
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }
}

/// Paginator whose total count is estimated and cached.
///
/// `materialized` holds rows already fetched by the caller. Their number,
/// plus the rows before them, is the last-resort count when estimation
/// fails unexpectedly.
pub struct CachingPaginator<T> {
    query: ListingQuery,
    backend: Arc<dyn CountBackend>,
    cache: Arc<dyn CountCache>,
    options: CountOptions,
    per_page: u64,
    orphans: u64,
    allow_empty_first_page: bool,
    materialized: Vec<T>,
    /// Rows of the listing that come before `materialized`
    materialized_offset: u64,
    count: OnceLock<u64>,
}

impl<T> CachingPaginator<T> {
    pub fn new(
        query: ListingQuery,
        per_page: u32,
        backend: Arc<dyn CountBackend>,
        cache: Arc<dyn CountCache>,
    ) -> Self {
        Self {
            query,
            backend,
            cache,
            options: CountOptions::default(),
            per_page: u64::from(per_page.max(1)),
            orphans: 0,
            allow_empty_first_page: true,
            materialized: Vec::new(),
            materialized_offset: 0,
            count: OnceLock::new(),
        }
    }

    pub fn with_options(mut self, options: CountOptions) -> Self {
        self.options = options;
        self
    }

    /// Fold a trailing page of at most `orphans` rows into the previous one
    pub fn with_orphans(mut self, orphans: u32) -> Self {
        self.orphans = u64::from(orphans);
        self
    }

    pub fn allow_empty_first_page(mut self, allow: bool) -> Self {
        self.allow_empty_first_page = allow;
        self
    }

    pub fn with_materialized(mut self, rows: Vec<T>) -> Self {
        self.materialized = rows;
        self
    }

    /// Rows already fetched for one page, starting `offset` rows into the
    /// listing. A fallback count then covers every row up to that page.
    pub fn with_materialized_page(mut self, offset: u64, rows: Vec<T>) -> Self {
        self.materialized = rows;
        self.materialized_offset = offset;
        self
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn materialized(&self) -> &[T] {
        &self.materialized
    }

    pub fn into_materialized(self) -> Vec<T> {
        self.materialized
    }

    /// Total number of rows across all pages. Never fails.
    pub async fn count(&self) -> u64 {
        if let Some(count) = self.count.get() {
            return *count;
        }

        match self.compute_count().await {
            Ok(Counted::Known(count)) => *self.count.get_or_init(|| count),
            Ok(Counted::Aborted) => *self.count.get_or_init(|| 0),
            Err(err) => {
                let fallback = self.materialized_offset + self.materialized.len() as u64;
                warn!(
                    table = %self.query.table(),
                    error = %err,
                    fallback,
                    "Count estimation failed, using materialized rows"
                );
                *self.count.get_or_init(|| fallback)
            }
        }
    }

    async fn compute_count(&self) -> Result<Counted, CountError> {
        let key = count_cache_key(&self.query);

        // Negative values are the "missing" sentinel
        match self.cache.get(&key).await? {
            Some(cached) if cached >= 0 => {
                debug!(key = %key, count = cached, "Count cache hit");
                return Ok(Counted::Known(cached as u64));
            }
            _ => {}
        }

        let count = if self.query.has_predicate() {
            match self
                .backend
                .bounded_count(&self.query, self.options.timeout)
                .await
            {
                Ok(count) => count.max(0),
                Err(CountError::Aborted { timed_out, message }) => {
                    warn!(
                        table = %self.query.table(),
                        timed_out,
                        error = %message,
                        "Filtered count aborted, reporting zero rows"
                    );
                    return Ok(Counted::Aborted);
                }
                Err(err) => return Err(err),
            }
        } else {
            let estimate = self.backend.estimate_table_rows(self.query.table()).await?;
            if estimate < 0 {
                debug!(table = %self.query.table(), "Table has no statistics yet");
                return Ok(Counted::Known(0));
            }
            estimate
        };

        self.cache.set(&key, count, self.options.cache_ttl).await?;
        debug!(key = %key, count, "Count cached");

        Ok(Counted::Known(count as u64))
    }

    pub async fn num_pages(&self) -> u64 {
        let count = self.count().await;
        if count == 0 && !self.allow_empty_first_page {
            return 0;
        }
        let hits = count.saturating_sub(self.orphans).max(1);
        hits.div_ceil(self.per_page)
    }

    /// Check that `number` names an existing page
    pub async fn validate_number(&self, number: u64) -> Result<u64, PageError> {
        if number < 1 {
            return Err(PageError::LessThanOne);
        }
        if number > self.num_pages().await {
            if number == 1 && self.allow_empty_first_page {
                return Ok(number);
            }
            return Err(PageError::NoResults);
        }
        Ok(number)
    }

    pub async fn page(&self, number: u64) -> Result<PageInfo, PageError> {
        let number = self.validate_number(number).await?;
        Ok(self.page_info(number).await)
    }

    /// Page from a raw query parameter
    pub async fn page_for(&self, raw: &str) -> Result<PageInfo, PageError> {
        let number = parse_page_number(raw)?;
        self.page(number).await
    }

    /// Lenient lookup: invalid numbers give the first page, numbers past
    /// the end give the last one
    pub async fn get_page(&self, raw: &str) -> PageInfo {
        let number = match parse_page_number(raw) {
            Ok(number) => number,
            Err(_) => 1,
        };
        match self.validate_number(number).await {
            Ok(number) => self.page_info(number).await,
            Err(PageError::NoResults) => {
                let last = self.num_pages().await.max(1);
                self.page_info(last).await
            }
            Err(_) => self.page_info(1).await,
        }
    }

    async fn page_info(&self, number: u64) -> PageInfo {
        let count = self.count().await;
        let num_pages = self.num_pages().await;

        let bottom = (number - 1) * self.per_page;
        let mut top = bottom + self.per_page;
        if top + self.orphans >= count {
            top = count;
        }

        PageInfo {
            number,
            num_pages,
            count,
            per_page: self.per_page,
            start_index: if count == 0 { 0 } else { bottom + 1 },
            end_index: top.max(bottom),
            has_next: number < num_pages,
            has_previous: number > 1,
        }
    }
}

/// Parse a 1-based page number
pub fn parse_page_number(raw: &str) -> Result<u64, PageError> {
    let number: i64 = raw.trim().parse().map_err(|_| PageError::NotAnInteger)?;
    if number < 1 {
        return Err(PageError::LessThanOne);
    }
    Ok(number as u64)
}
