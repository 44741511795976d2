//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod contest;
pub mod permission;
pub mod statistic;

pub use contest::*;
pub use permission::*;
pub use statistic::*;
