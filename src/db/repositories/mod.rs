//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod contest_repo;
pub mod listing_repo;
pub mod statistic_repo;

pub use contest_repo::ContestRepository;
pub use listing_repo::ListingRepository;
pub use statistic_repo::StatisticRepository;
