//! Listing pagination with approximate, cached row counts
//!
//! - `query`: the listing description and its SQL
//! - `cache`: shared count cache (Redis or in-process)
//! - `backend`: table statistics and timeout-bounded counts
//! - `paginator`: the count estimation itself plus page arithmetic

pub mod backend;
pub mod cache;
pub mod error;
pub mod paginator;
pub mod query;

pub use backend::{CountBackend, PgCountBackend};
pub use cache::{count_cache_key, CountCache, MemoryCountCache, RedisCountCache};
pub use error::{CountError, PageError};
pub use paginator::{parse_page_number, CachingPaginator, CountOptions, PageInfo};
pub use query::{ListingQuery, OrderBy, Predicate, SqlValue};
