//! URL tables

pub mod ranking;

pub use ranking::RankingRoute;
