//! Rankboard - ranking site listings with approximate row counts
//!
//! This library serves the admin changelists and the ranking standings of
//! a contest ranking site. Large tables are paginated without exact
//! `COUNT(*)` scans: unfiltered listings read the planner's row estimate,
//! filtered ones run a count under a statement timeout, and results are
//! shared through a cache.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Pagination**: Count estimation, caching and page arithmetic
//! - **Admin**: Listing configuration, search, ordering and form widgets
//! - **Routing**: The ranking URL table
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod admin;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routing;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
