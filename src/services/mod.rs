//! Business logic services

pub mod auth_service;
pub mod listing_service;
pub mod standings_service;

pub use auth_service::AuthService;
pub use listing_service::{ChangelistOutcome, ListingService};
pub use standings_service::{StandingsOutcome, StandingsService};
